#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}
