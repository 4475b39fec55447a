//! Main assembler logic
//!
//! Two passes over the parsed lines: the first lays out addresses and
//! collects labels, the second resolves label references and emits bytes.

use crate::encoder::{build, encode};
use crate::error::{AssemblerError, Result};
use crate::parser::{parse_line, Item, Statement, Value};
use ls8_spec::{Program, MEMORY_SIZE};
use std::collections::HashMap;

/// Label name -> (address, defining line)
type SymbolTable = HashMap<String, (usize, usize)>;

/// Assemble source code into a program
pub fn assemble(source: &str) -> Result<Program> {
    let statements = source
        .lines()
        .enumerate()
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect::<Result<Vec<Statement>>>()?;

    let symbols = layout(&statements)?;
    let code = emit(&statements, &symbols)?;

    tracing::debug!(bytes = code.len(), labels = symbols.len(), "assembled program");
    Ok(Program::new(code))
}

/// First pass: assign addresses to labels
fn layout(statements: &[Statement]) -> Result<SymbolTable> {
    let mut symbols = SymbolTable::new();
    let mut addr = 0usize;

    for stmt in statements {
        for label in &stmt.labels {
            if let Some(&(_, first)) = symbols.get(label) {
                return Err(AssemblerError::DuplicateLabel {
                    line: stmt.line,
                    label: label.clone(),
                    first,
                });
            }
            symbols.insert(label.clone(), (addr, stmt.line));
        }

        addr += stmt.item.as_ref().map_or(0, Item::size);
    }

    if addr > MEMORY_SIZE {
        return Err(AssemblerError::ProgramTooLarge {
            size: addr,
            capacity: MEMORY_SIZE,
        });
    }

    Ok(symbols)
}

/// Second pass: resolve labels and encode
fn emit(statements: &[Statement], symbols: &SymbolTable) -> Result<Vec<u8>> {
    let mut code = Vec::new();

    for stmt in statements {
        let line = stmt.line;
        let resolve = |value: &Value| resolve_value(value, symbols, line);

        match &stmt.item {
            None => {}
            Some(Item::Instruction { opcode, operands }) => {
                let instr = build(*opcode, operands, line, resolve)?;
                code.extend(encode(&instr));
            }
            Some(Item::Data(values)) => {
                for value in values {
                    code.push(resolve(value)?);
                }
            }
        }
    }

    Ok(code)
}

fn resolve_value(value: &Value, symbols: &SymbolTable, line: usize) -> Result<u8> {
    match value {
        Value::Literal(byte) => Ok(*byte),
        Value::Label(label) => {
            let &(addr, _) = symbols.get(label).ok_or_else(|| AssemblerError::UndefinedLabel {
                line,
                label: label.clone(),
            })?;
            // a label just past the last byte of a full program has no 8-bit address
            u8::try_from(addr).map_err(|_| AssemblerError::InvalidImmediate {
                line,
                value: format!("{} ({})", label, addr),
            })
        }
    }
}
