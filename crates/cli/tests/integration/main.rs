mod clean_tests;
mod common;
mod publish_tests;
