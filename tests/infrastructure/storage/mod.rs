mod scratch_dir_test;
