use std::cell::RefCell;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Resident and virtual memory of one process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessMemory {
    pub resident: u64,
    pub virtual_size: u64,
}

/// Reads the memory footprint of the running process.
pub struct ProcessProbe {
    sys: RefCell<System>,
    pid: Option<Pid>,
}

impl Default for ProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe {
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid().ok();
        if pid.is_none() {
            tracing::warn!("current pid unavailable, process counters will read as zero");
        }
        ProcessProbe {
            sys: RefCell::new(System::new()),
            pid,
        }
    }

    pub fn sample(&self) -> ProcessMemory {
        let Some(pid) = self.pid else {
            return ProcessMemory::default();
        };

        let mut sys = self.sys.borrow_mut();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        sys.process(pid)
            .map(|process| ProcessMemory {
                resident: process.memory(),
                virtual_size: process.virtual_memory(),
            })
            .unwrap_or_default()
    }
}
