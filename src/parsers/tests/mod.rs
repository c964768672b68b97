pub(crate) mod fixtures;

mod listing_parser_tests;
