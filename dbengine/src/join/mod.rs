pub mod join_type;
pub mod joiner;

pub use join_type::JoinType;
pub use joiner::execute_join;
