pub(crate) mod builder;
pub(crate) mod greedy;
pub(crate) mod two_opt;
