/// Sequential id generator for per-cycle records.
/// Ids are `{prefix}-{n:03}` with `n` counting up from 1.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    next: u32,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Generator for story hooks of one cycle: `hook-{cycle}-001`, ...
    pub fn for_hooks(cycle: u32) -> Self {
        Self::new(format!("hook-{cycle}"))
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{:03}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
