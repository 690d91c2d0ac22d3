/// Logical prefix joining one expression to the previous one (§4.7). `Not`
/// is absorbed into the comparator at parse time (an odd count inverts it)
/// and never appears in the reduce sequence itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}
