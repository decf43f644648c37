use std::fs;
use std::path::Path;

use goblin::{archive::Archive, pe, Object};

use crate::inspect::{BinaryInspector, InspectError};
use crate::model::Arch;

/// In-process inspector built on `goblin`.
///
/// Understands PE images (`.dll`), bare COFF objects, and `.lib` archives,
/// including the short-import members import libraries are made of.
pub struct GoblinInspector;

fn arch_from_machine(machine: u16) -> Option<Arch> {
    match machine {
        pe::header::COFF_MACHINE_X86 => Some(Arch::X86),
        pe::header::COFF_MACHINE_X86_64 => Some(Arch::X64),
        _ => None,
    }
}

/// Machine field of a short-import member, if `bytes` is one.
///
/// Short imports start with sig1 = IMAGE_FILE_MACHINE_UNKNOWN (0x0000) and
/// sig2 = 0xFFFF; the real machine type sits at offset 6.
fn short_import_machine(bytes: &[u8]) -> Option<u16> {
    if bytes.len() >= 8 && bytes[0..2] == [0x00, 0x00] && bytes[2..4] == [0xFF, 0xFF] {
        Some(u16::from_le_bytes([bytes[6], bytes[7]]))
    } else {
        None
    }
}

fn archive_machine(archive: &Archive, bytes: &[u8]) -> Option<u16> {
    for member in archive.members() {
        let Ok(data) = archive.extract(member, bytes) else { continue };
        if let Some(machine) = short_import_machine(data) {
            if machine != 0 {
                return Some(machine);
            }
            continue;
        }
        if let Ok(coff) = pe::Coff::parse(data) {
            if coff.header.machine != 0 {
                return Some(coff.header.machine);
            }
        }
    }
    None
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, InspectError> {
    if !path.is_file() {
        return Err(InspectError::MissingArtifact(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| InspectError::Io { path: path.to_path_buf(), source })
}

impl BinaryInspector for GoblinInspector {
    fn architecture(&self, path: &Path) -> Result<Option<Arch>, InspectError> {
        let bytes = read_bytes(path)?;
        let machine = match Object::parse(&bytes) {
            Ok(Object::PE(pe)) => Some(pe.header.coff_header.machine),
            Ok(Object::Archive(archive)) => archive_machine(&archive, &bytes),
            // Bare COFF objects are not always recognized by Object::parse;
            // fall back to a direct COFF header parse.
            _ => pe::Coff::parse(&bytes).ok().map(|coff| coff.header.machine),
        };
        match machine {
            Some(m) => Ok(arch_from_machine(m)),
            None => Err(InspectError::UnrecognizedFormat(path.to_path_buf())),
        }
    }

    fn imports(&self, path: &Path) -> Result<Vec<String>, InspectError> {
        let bytes = read_bytes(path)?;
        match Object::parse(&bytes) {
            Ok(Object::PE(pe)) => Ok(pe.libraries.iter().map(|lib| lib.to_string()).collect()),
            _ => Err(InspectError::UnrecognizedFormat(path.to_path_buf())),
        }
    }

    fn name(&self) -> &'static str {
        "goblin"
    }
}
