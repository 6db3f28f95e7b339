use sysinfo::{ProcessesToUpdate, System};

/// Check whether any live process has one of the given names
pub fn is_process_running(names: &[String]) -> bool {
    if names.is_empty() {
        return false;
    }

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    system.processes().values().any(|process| {
        let name = process.name().to_string_lossy();
        names.iter().any(|n| n.as_str() == name.as_ref())
    })
}
