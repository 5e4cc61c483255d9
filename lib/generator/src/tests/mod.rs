mod depth;
mod interface;
mod leaf_overrides;
mod variables;
