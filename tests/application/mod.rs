mod engine_loader_test;
