#[path = "../test_helpers/mod.rs"]
mod test_helpers;
