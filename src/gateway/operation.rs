//! Logical operation table
//!
//! Each logical operation maps to one remote call: a path segment under
//! `/api/cheatengine/`, an HTTP method, and a timeout class.

/// HTTP method for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Timeout budget class. Scan steps run for as long as the remote needs to
/// walk target memory; everything else answers in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    Short,
    Scan,
}

/// A logical operation against the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Health,
    ProcessList,
    ThreadList,
    ProcessStatus,
    OpenProcess,
    ReadMemory,
    WriteMemory,
    Disassemble,
    GetInstructionSize,
    Convert,
    ExecuteLua,
    AobScan,
    ResolveAddress,
    FirstScan,
    NextScan,
    ScanResults,
    NewScan,
}

impl Operation {
    /// The path segment identifying this operation
    pub const fn path(&self) -> &'static str {
        match self {
            Operation::Health => "health",
            Operation::ProcessList => "process-list",
            Operation::ThreadList => "thread-list",
            Operation::ProcessStatus => "process-status",
            Operation::OpenProcess => "open-process",
            Operation::ReadMemory => "read-memory",
            Operation::WriteMemory => "write-memory",
            Operation::Disassemble => "disassemble",
            Operation::GetInstructionSize => "get-instruction-size",
            Operation::Convert => "convert",
            Operation::ExecuteLua => "execute-lua",
            Operation::AobScan => "aob-scan",
            Operation::ResolveAddress => "resolve-address",
            Operation::FirstScan => "first-scan",
            Operation::NextScan => "next-scan",
            Operation::ScanResults => "scan-results",
            Operation::NewScan => "new-scan",
        }
    }

    /// GET for stateless listings and status; POST for anything carrying a
    /// payload.
    pub const fn method(&self) -> HttpMethod {
        match self {
            Operation::Health
            | Operation::ProcessList
            | Operation::ThreadList
            | Operation::ProcessStatus => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Which timeout budget applies
    pub const fn timeout_class(&self) -> TimeoutClass {
        match self {
            Operation::FirstScan | Operation::NextScan | Operation::AobScan => TimeoutClass::Scan,
            _ => TimeoutClass::Short,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stateless_reads_use_get() {
        for op in [
            Operation::Health,
            Operation::ProcessList,
            Operation::ThreadList,
            Operation::ProcessStatus,
        ] {
            assert_eq!(op.method(), HttpMethod::Get);
        }
    }

    #[test]
    fn test_payload_operations_use_post() {
        for op in [
            Operation::OpenProcess,
            Operation::ReadMemory,
            Operation::WriteMemory,
            Operation::FirstScan,
            Operation::NextScan,
            Operation::ScanResults,
            Operation::NewScan,
        ] {
            assert_eq!(op.method(), HttpMethod::Post);
        }
    }

    #[test]
    fn test_scan_operations_get_long_budget() {
        assert_eq!(Operation::FirstScan.timeout_class(), TimeoutClass::Scan);
        assert_eq!(Operation::NextScan.timeout_class(), TimeoutClass::Scan);
        assert_eq!(Operation::AobScan.timeout_class(), TimeoutClass::Scan);
        // Results retrieval is a bounded read, not a scan.
        assert_eq!(Operation::ScanResults.timeout_class(), TimeoutClass::Short);
        assert_eq!(Operation::ReadMemory.timeout_class(), TimeoutClass::Short);
    }

    #[test]
    fn test_paths_are_unique() {
        let ops = [
            Operation::Health,
            Operation::ProcessList,
            Operation::ThreadList,
            Operation::ProcessStatus,
            Operation::OpenProcess,
            Operation::ReadMemory,
            Operation::WriteMemory,
            Operation::Disassemble,
            Operation::GetInstructionSize,
            Operation::Convert,
            Operation::ExecuteLua,
            Operation::AobScan,
            Operation::ResolveAddress,
            Operation::FirstScan,
            Operation::NextScan,
            Operation::ScanResults,
            Operation::NewScan,
        ];
        let mut paths: Vec<_> = ops.iter().map(|o| o.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ops.len());
    }
}
