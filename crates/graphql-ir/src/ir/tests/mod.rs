mod selection_key_tests;
