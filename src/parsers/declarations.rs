//! Top-level declaration collection over an OXC program
//!
//! Only the statements directly in the program body are inspected. Nested
//! scopes (methods, inner functions, blocks) are never entered.

use super::Extraction;
use oxc_ast::ast::*;

/// Placeholder name for declarations without an identifier
pub const ANONYMOUS: &str = "anonymous";

/// Every file starts with this score
pub const BASE_COMPLEXITY: u32 = 1;
pub const FUNCTION_WEIGHT: u32 = 1;
pub const CLASS_WEIGHT: u32 = 2;
pub const BRANCH_WEIGHT: u32 = 1;

/// Collects function and class names plus a complexity score
pub struct DeclarationCollector {
    functions: Vec<String>,
    classes: Vec<String>,
    complexity: u32,
}

impl DeclarationCollector {
    /// Scan the top-level statements of a program
    pub fn collect(program: &Program<'_>) -> Extraction {
        let mut collector = Self {
            functions: Vec::new(),
            classes: Vec::new(),
            complexity: BASE_COMPLEXITY,
        };

        for stmt in &program.body {
            collector.visit_statement(stmt);
        }

        Extraction {
            functions: collector.functions,
            classes: collector.classes,
            complexity: collector.complexity,
            recovered_errors: Vec::new(),
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::FunctionDeclaration(func) => self.add_function(func.id.as_ref()),
            Statement::ClassDeclaration(class) => self.add_class(class.id.as_ref()),
            Statement::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            Statement::IfStatement(_)
            | Statement::ForStatement(_)
            | Statement::ForInStatement(_)
            | Statement::ForOfStatement(_)
            | Statement::WhileStatement(_)
            | Statement::DoWhileStatement(_) => self.complexity += BRANCH_WEIGHT,
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    self.visit_declaration(declaration);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    self.add_function(func.id.as_ref())
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    self.add_class(class.id.as_ref())
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn visit_declaration(&mut self, declaration: &Declaration<'_>) {
        match declaration {
            Declaration::FunctionDeclaration(func) => self.add_function(func.id.as_ref()),
            Declaration::ClassDeclaration(class) => self.add_class(class.id.as_ref()),
            Declaration::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            _ => {}
        }
    }

    /// `const f = () => ...` and `let g = function () {}` count as functions
    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'_>) {
        for declarator in &decl.declarations {
            let is_function_valued = matches!(
                declarator.init,
                Some(Expression::ArrowFunctionExpression(_))
                    | Some(Expression::FunctionExpression(_))
            );
            if !is_function_valued {
                continue;
            }
            if let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind {
                self.functions.push(id.name.to_string());
                self.complexity += FUNCTION_WEIGHT;
            }
        }
    }

    fn add_function(&mut self, id: Option<&BindingIdentifier<'_>>) {
        self.functions.push(name_or_anonymous(id));
        self.complexity += FUNCTION_WEIGHT;
    }

    fn add_class(&mut self, id: Option<&BindingIdentifier<'_>>) {
        self.classes.push(name_or_anonymous(id));
        self.complexity += CLASS_WEIGHT;
    }
}

fn name_or_anonymous(id: Option<&BindingIdentifier<'_>>) -> String {
    id.map(|id| id.name.to_string())
        .unwrap_or_else(|| ANONYMOUS.to_string())
}
