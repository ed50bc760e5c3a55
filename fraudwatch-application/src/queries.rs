pub mod case_queries;
pub mod ranking_queries;
