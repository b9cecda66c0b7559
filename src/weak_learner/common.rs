pub(crate) mod split_rule;
pub(crate) mod node;
pub(crate) mod sweep;
pub(crate) mod train_node;
