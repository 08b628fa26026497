mod tables;

pub use tables::{print_issues, print_penalties, print_roster};
