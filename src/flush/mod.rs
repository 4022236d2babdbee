mod jsonl;

pub use jsonl::flush_cycle_to_jsonl;
