use pcislot_common::config::ToolSet;
use pcislot_common::error::PciSlotError;
use pcislot_core::devices::DeviceCorrelator;
use pcislot_core::slots::SlotResolver;

use crate::support::runner::ScriptedRunner;

const SLOT_DUMP: &str = "\
# dmidecode 3.4
Getting SMBIOS data from sysfs.
SMBIOS 3.2.0 present.

Handle 0x0901, DMI type 9, 17 bytes
System Slot Information
\tDesignation: Slot 3
\tType: x8 PCI Express 3 x16
\tCurrent Usage: In Use
\tLength: Long
\tID: 3
\tBus Address: 0000:01:00.0

Handle 0x0902, DMI type 9, 17 bytes
System Slot Information
\tDesignation: Slot 4
\tType: x16 PCI Express 3 x16
\tCurrent Usage: Available
\tLength: Long
\tID: 4

Handle 0x0903, DMI type 9, 17 bytes
System Slot Information
\tDesignation: Slot 30
\tType: x4 PCI Express 3
\tCurrent Usage: In Use
\tID: 30
\tBus Address: 0000:81:00.0
";

const LSPCI: &str = "\
00:00.0 Host bridge: Intel Corporation Xeon E3-1200 v6/7th Gen Core Processor Host Bridge/DRAM Registers (rev 05)
00:14.0 USB controller: Intel Corporation 100 Series/C230 Series Chipset Family USB 3.0 xHCI Controller (rev 31)
00:1f.6 Ethernet controller: Intel Corporation Ethernet Connection (2) I219-LM (rev 31)
01:00.0 Ethernet controller: Intel Corporation I350 Gigabit Network Connection (rev 01)
01:00.1 Ethernet controller: Intel Corporation I350 Gigabit Network Connection (rev 01)
03:00.0 Network controller: Intel Corporation Wi-Fi 6 AX200 (rev 1a)
";

fn runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .respond("dmidecode -t slot", SLOT_DUMP)
        .respond("lspci", LSPCI)
        .respond(
            "lspci -s 0000:01:00.0",
            "01:00.0 Ethernet controller: Intel Corporation I350 Gigabit Network Connection (rev 01)\n",
        )
}

/*************************************************************
                       Slot resolution
**************************************************************/

#[test]
fn populated_slot_resolves_to_stripped_bus_address() {
    let runner = runner();
    let tools = ToolSet::default();
    let record = SlotResolver::new(&runner, &tools).resolve_slot("3").unwrap();

    assert_eq!(record.slot_number, "3");
    assert_eq!(record.bus_address.as_deref(), Some("01:00.0"));
    assert_eq!(runner.calls(), vec!["dmidecode -t slot"]);
}

#[test]
fn slot_number_is_matched_as_whole_token() {
    let runner = runner();
    let tools = ToolSet::default();
    let record = SlotResolver::new(&runner, &tools).resolve_slot("30").unwrap();
    assert_eq!(record.bus_address.as_deref(), Some("81:00.0"));
}

#[test]
fn empty_slot_has_no_bus_address() {
    let runner = runner();
    let tools = ToolSet::default();
    let err = SlotResolver::new(&runner, &tools).resolve_slot("4").unwrap_err();
    assert_eq!(err, PciSlotError::BusAddressMissing { slot: "4".to_string() });
}

#[test]
fn unknown_slot_is_not_found() {
    let runner = runner();
    let tools = ToolSet::default();
    let err = SlotResolver::new(&runner, &tools).resolve_slot("9").unwrap_err();
    assert_eq!(err, PciSlotError::SlotNotFound { slot: "9".to_string() });
}

#[test]
fn missing_enumerator_is_tool_unavailable() {
    let runner = ScriptedRunner::new().without("dmidecode");
    let tools = ToolSet::default();
    let err = SlotResolver::new(&runner, &tools).resolve_slot("3").unwrap_err();
    assert!(matches!(err, PciSlotError::ToolUnavailable { ref tool, .. } if tool == "dmidecode"));
}

#[test]
fn every_slot_is_listed() {
    let runner = runner();
    let tools = ToolSet::default();
    let slots = SlotResolver::new(&runner, &tools).list_slots().unwrap();

    let numbers: Vec<&str> = slots.iter().map(|s| s.slot_number.as_str()).collect();
    assert_eq!(numbers, vec!["3", "4", "30"]);
    assert!(slots[1].bus_address.is_none());
}

/*************************************************************
                     Device correlation
**************************************************************/

#[test]
fn resolved_slot_correlates_to_device() {
    let runner = runner();
    let tools = ToolSet::default();
    let record = SlotResolver::new(&runner, &tools).resolve_slot("3").unwrap();
    let device = DeviceCorrelator::new(&runner, &tools)
        .require_device(record.bus_address.as_deref().unwrap())
        .unwrap();

    assert_eq!(device.class_description, "Ethernet controller");
    assert!(device.is_network());
}

#[test]
fn unknown_address_is_device_not_found() {
    let runner = runner();
    let tools = ToolSet::default();
    let devices = DeviceCorrelator::new(&runner, &tools);

    assert_eq!(devices.lookup_device("05:00.0").unwrap(), None);
    assert!(matches!(
        devices.require_device("05:00.0"),
        Err(PciSlotError::DeviceNotFound { .. })
    ));
}

#[test]
fn network_controllers_are_grouped_per_card() {
    let runner = runner();
    let tools = ToolSet::default();
    let groups = DeviceCorrelator::new(&runner, &tools).network_groups().unwrap();

    let bases: Vec<String> = groups.iter().map(|g| g.base.short()).collect();
    assert_eq!(bases, vec!["00:1f", "01:00", "03:00"]);

    let ports: Vec<String> = groups[1].ports.iter().map(|p| p.address.short()).collect();
    assert_eq!(ports, vec!["01:00.0", "01:00.1"]);
}

#[test]
fn no_network_controllers_yields_no_groups() {
    let runner = ScriptedRunner::new().respond(
        "lspci",
        "00:14.0 USB controller: Intel Corporation xHCI Controller (rev 31)\n",
    );
    let tools = ToolSet::default();
    let groups = DeviceCorrelator::new(&runner, &tools).network_groups().unwrap();
    assert!(groups.is_empty());
}
