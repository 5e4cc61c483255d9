pub static TYPENAME_FIELD: &str = "__typename";

pub fn get_indent(depth: usize) -> String {
    "  ".repeat(depth)
}
