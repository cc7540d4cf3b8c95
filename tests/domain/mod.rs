mod artifact_path_test;
