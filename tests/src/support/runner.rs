use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use pcislot_common::error::{PciSlotError, Result};
use pcislot_core::runner::{CommandOutput, CommandRunner};

/// Answers commands from a script keyed by `program arg arg...`.
///
/// `pvesh create` is stateful: created mappings show up in later
/// `pvesh get` dumps and a second create with the same name fails.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    missing: BTreeSet<String>,
    mappings: RefCell<Vec<(String, String)>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command: &str, stdout: &str) -> Self {
        self.respond_output(command, ok(stdout))
    }

    pub fn respond_output(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    pub fn fail(self, command: &str, status: i32, stderr: &str) -> Self {
        self.respond_output(
            command,
            CommandOutput {
                success: false,
                status: Some(status),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Makes `program` impossible to start.
    pub fn without(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn pvesh(&self, args: &[&str]) -> Option<CommandOutput> {
        match args {
            ["get", "/cluster/mapping/pci", ..] => Some(ok(&self.mapping_dump())),
            ["create", "/cluster/mapping/pci", "--id", name, "--map", map] => {
                let mut mappings = self.mappings.borrow_mut();
                if mappings.iter().any(|(existing, _)| existing.as_str() == *name) {
                    return Some(CommandOutput {
                        success: false,
                        status: Some(255),
                        stdout: String::new(),
                        stderr: format!("create failed - mapping '{name}' already exists"),
                    });
                }
                mappings.push((name.to_string(), map.to_string()));
                Some(ok(""))
            }
            _ => None,
        }
    }

    fn mapping_dump(&self) -> String {
        let entries: Vec<String> = self
            .mappings
            .borrow()
            .iter()
            .map(|(name, map)| {
                format!("   {{\n      \"id\" : \"{name}\",\n      \"map\" : [\n         \"{map}\"\n      ]\n   }}")
            })
            .collect();
        format!("[\n{}\n]\n", entries.join(",\n"))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let key = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(key.clone());

        if self.missing.contains(program) {
            return Err(PciSlotError::tool(program, "No such file or directory (os error 2)"));
        }
        if let Some(output) = self.responses.get(&key) {
            return Ok(output.clone());
        }
        if program == "pvesh" {
            if let Some(output) = self.pvesh(args) {
                return Ok(output);
            }
        }
        // lspci prints nothing for an address it does not know.
        Ok(ok(""))
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}
