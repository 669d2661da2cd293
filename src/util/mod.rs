pub(crate) mod civil;
