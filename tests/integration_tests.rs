// Integration tests for lazydocs

mod integration {
    mod analyzer_test;
    mod cli_test;
    mod docgen_test;
}
