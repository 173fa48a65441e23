use pcislot_common::config::{SystemPaths, ToolSet};
use pcislot_common::error::PciSlotError;
use pcislot_common::mapping::MappingRequest;
use pcislot_core::mapping::MappingCreator;
use pcislot_core::runner::CommandOutput;
use pcislot_core::usage::UsageChecker;

use crate::support::runner::ScriptedRunner;

fn request(name: &str) -> MappingRequest {
    MappingRequest::new(name, "pve1", "0000:01:00.0", "8086:1521").unwrap()
}

#[test]
fn created_mapping_shows_up_in_the_dump() {
    let runner = ScriptedRunner::new();
    let tools = ToolSet::default();
    let paths = SystemPaths::default();

    MappingCreator::new(&runner, &tools).create_mapping(&request("nic0")).unwrap();

    let lines = UsageChecker::new(&runner, &tools, &paths)
        .find_mapping("01:00.0")
        .unwrap();
    assert_eq!(lines, vec!["\"node=pve1,path=0000:01:00.0,id=8086:1521\"".to_string()]);
    assert_eq!(
        runner.calls()[0],
        "pvesh create /cluster/mapping/pci --id nic0 --map node=pve1,path=0000:01:00.0,id=8086:1521"
    );
}

#[test]
fn duplicate_name_fails_and_keeps_first_mapping() {
    let runner = ScriptedRunner::new();
    let tools = ToolSet::default();
    let paths = SystemPaths::default();
    let creator = MappingCreator::new(&runner, &tools);

    creator.create_mapping(&request("nic0")).unwrap();
    let err = creator.create_mapping(&request("nic0")).unwrap_err();

    assert_eq!(
        err,
        PciSlotError::Mapping {
            message: "create failed - mapping 'nic0' already exists".to_string()
        }
    );
    let lines = UsageChecker::new(&runner, &tools, &paths)
        .find_mapping("0000:01:00.0")
        .unwrap();
    assert_eq!(lines.len(), 1);
}

#[test]
fn error_text_on_successful_exit_is_still_a_failure() {
    let runner = ScriptedRunner::new().respond_output(
        "pvesh create /cluster/mapping/pci --id nic0 --map node=pve1,path=0000:01:00.0,id=8086:1521",
        CommandOutput {
            success: true,
            status: Some(0),
            stdout: String::new(),
            stderr: "400 Parameter verification failed.\nmap: error: invalid format\n".to_string(),
        },
    );
    let tools = ToolSet::default();
    let err = MappingCreator::new(&runner, &tools)
        .create_mapping(&request("nic0"))
        .unwrap_err();

    assert_eq!(
        err,
        PciSlotError::Mapping {
            message: "400 Parameter verification failed.\nmap: error: invalid format".to_string()
        }
    );
}

#[test]
fn failed_exit_without_stderr_reports_status() {
    let runner = ScriptedRunner::new().fail(
        "pvesh create /cluster/mapping/pci --id nic0 --map node=pve1,path=0000:01:00.0,id=8086:1521",
        2,
        "",
    );
    let tools = ToolSet::default();
    let err = MappingCreator::new(&runner, &tools)
        .create_mapping(&request("nic0"))
        .unwrap_err();

    let PciSlotError::Mapping { message } = err else {
        panic!("expected a mapping error, got {err:?}");
    };
    assert!(message.contains("status Some(2)"), "{message}");
}

#[test]
fn missing_cluster_client_is_tool_unavailable() {
    let runner = ScriptedRunner::new().without("pvesh");
    let tools = ToolSet::default();
    let err = MappingCreator::new(&runner, &tools)
        .create_mapping(&request("nic0"))
        .unwrap_err();
    assert!(matches!(err, PciSlotError::ToolUnavailable { .. }));
}

#[test]
fn hostile_fields_never_reach_the_client() {
    assert!(MappingRequest::new("nic0;reboot", "pve1", "01:00.0", "8086:1521").is_err());
    assert!(MappingRequest::new("nic0", "pve1,path=00:00.0", "01:00.0", "8086:1521").is_err());
    assert!(MappingRequest::new("nic0", "pve1", "01:00.0 --delete", "8086:1521").is_err());
    assert!(MappingRequest::new("nic0", "pve1", "01:00.0", "8086:1521,x").is_err());
}
