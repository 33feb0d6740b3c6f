//! Built-in workloads driven by the demo harness

use std::hint::black_box;
use std::thread;
use std::time::Duration;

/// One benchmark operation of a known shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// Pure arithmetic, CPU-bound
    Checksum,
    /// Blocked in the kernel, close to zero CPU time
    Sleep,
    /// Heap allocation and a pass over the buffer
    Allocate,
}

impl Workload {
    pub fn all() -> &'static [Workload] {
        &[Workload::Checksum, Workload::Sleep, Workload::Allocate]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Workload::Checksum => "checksum",
            Workload::Sleep => "sleep",
            Workload::Allocate => "allocate",
        }
    }

    /// Perform a single operation
    pub fn run_once(&self) {
        match self {
            Workload::Checksum => {
                let mut hash = 0xcbf2_9ce4_8422_2325u64;
                for i in 0..4096u64 {
                    hash ^= black_box(i);
                    hash = hash.wrapping_mul(0x0100_0000_01b3);
                }
                black_box(hash);
            }
            Workload::Sleep => thread::sleep(Duration::from_micros(200)),
            Workload::Allocate => {
                let buffer: Vec<u64> = (0..1024u64).collect();
                black_box(buffer.iter().sum::<u64>());
            }
        }
    }
}
