mod field_merger_tests;
mod fragment_splitter_tests;
mod test_utils;
