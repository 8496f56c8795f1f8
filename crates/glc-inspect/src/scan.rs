use std::fs;
use std::path::Path;

use glc_symver::{SymbolBinding, VersionedSymbol, baseline_for_arch};
use object::elf::{FileHeader32, FileHeader64};
use object::read::archive::ArchiveFile;
use object::read::elf::{ElfFile, FileHeader};
use object::{
    Architecture, Endianness, FileKind, Object, ObjectKind, ObjectSection, ObjectSymbol, SymbolKind,
    SymbolSection,
};
use tracing::{debug, info};

use crate::error::{InspectError, Result};
use crate::report::{DefinedSymbol, FileClass, Import, InspectionReport};

pub fn inspect_path(path: impl AsRef<Path>) -> Result<InspectionReport> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(InspectError::FileNotFound(path.display().to_string()));
    }
    let data = fs::read(path)?;
    let report = inspect_bytes(&data)?;
    info!(
        path = %path.display(),
        class = ?report.class,
        defined = report.defined.len(),
        imports = report.imports.len(),
        max_required = ?report.max_required.map(|v| v.to_string()),
        "inspected file"
    );
    Ok(report)
}

pub fn inspect_bytes(data: &[u8]) -> Result<InspectionReport> {
    match FileKind::parse(data)? {
        FileKind::Archive => inspect_archive(data),
        FileKind::Elf32 => {
            let mut report = InspectionReport::new(FileClass::Other);
            let class = scan_elf::<FileHeader32<Endianness>>(data, None, &mut report)?;
            report.class = class;
            Ok(report)
        }
        FileKind::Elf64 => {
            let mut report = InspectionReport::new(FileClass::Other);
            let class = scan_elf::<FileHeader64<Endianness>>(data, None, &mut report)?;
            report.class = class;
            Ok(report)
        }
        other => Err(InspectError::Unsupported(format!("{other:?}"))),
    }
}

fn inspect_archive(data: &[u8]) -> Result<InspectionReport> {
    let archive = ArchiveFile::parse(data)?;
    let mut report = InspectionReport::new(FileClass::Archive);

    for member in archive.members() {
        let member = member?;
        let name = String::from_utf8_lossy(member.name()).into_owned();
        let bytes = member.data(data)?;
        match FileKind::parse(bytes) {
            Ok(FileKind::Elf32) => {
                scan_elf::<FileHeader32<Endianness>>(bytes, Some(&name), &mut report)?;
            }
            Ok(FileKind::Elf64) => {
                scan_elf::<FileHeader64<Endianness>>(bytes, Some(&name), &mut report)?;
            }
            _ => debug!(member = %name, "skipping non-ELF archive member"),
        }
    }

    Ok(report)
}

/// Adds one ELF file's symbols to `report` and returns its class.
fn scan_elf<Elf>(
    data: &[u8],
    member: Option<&str>,
    report: &mut InspectionReport,
) -> Result<FileClass>
where
    Elf: FileHeader<Endian = Endianness>,
{
    let file = ElfFile::<Elf>::parse(data)?;
    let class = match file.kind() {
        ObjectKind::Relocatable => FileClass::Relocatable,
        ObjectKind::Executable => FileClass::Executable,
        // PIE executables are ET_DYN with an interpreter.
        ObjectKind::Dynamic if file.section_by_name(".interp").is_some() => {
            FileClass::Executable
        }
        ObjectKind::Dynamic => FileClass::SharedObject,
        _ => FileClass::Other,
    };

    if report.baseline.is_none() {
        report.baseline = cargo_arch(file.architecture())
            .and_then(|arch| baseline_for_arch(arch, file.is_little_endian()).ok());
    }

    let linked = class != FileClass::Relocatable;
    let mut symbols: Vec<_> = file.symbols().collect();
    if symbols.is_empty() {
        symbols = file.dynamic_symbols().collect();
    }
    for symbol in &symbols {
        if matches!(symbol.kind(), SymbolKind::File | SymbolKind::Section) {
            continue;
        }
        // The linker demotes hidden definitions to locals in linked images.
        if !symbol.is_global() && !(linked && symbol.is_definition()) {
            continue;
        }
        let Ok(name) = symbol.name() else { continue };
        if name.is_empty() {
            continue;
        }

        if symbol.is_undefined() {
            // Linked images carry authoritative versions in the dynamic table.
            if !linked {
                record_import(report, name, None, member);
            }
            continue;
        }

        if let SymbolSection::Section(index) = symbol.section() {
            let section = file
                .section_by_index(index)
                .ok()
                .and_then(|section| section.name().ok().map(str::to_string));
            report.defined.push(DefinedSymbol {
                name: name.to_string(),
                member: member.map(str::to_string),
                section,
                address: symbol.address(),
            });
        }
    }

    if linked {
        let endian = file.endian();
        let versions = file.elf_section_table().versions(endian, data)?;
        for symbol in file.dynamic_symbols() {
            let Ok(name) = symbol.name() else { continue };
            if name.is_empty() {
                continue;
            }
            if !symbol.is_undefined() {
                if !report.exports(name) {
                    report.exported.push(name.to_string());
                }
                continue;
            }
            let tag = versions.as_ref().and_then(|table| {
                let index = table.version_index(endian, symbol.index());
                table
                    .version(index)
                    .ok()
                    .flatten()
                    .map(|version| String::from_utf8_lossy(version.name()).into_owned())
            });
            record_import(report, name, tag, member);
        }
    }

    debug!(
        member = member.unwrap_or("-"),
        ?class,
        symbols = symbols.len(),
        "scanned ELF file"
    );
    Ok(class)
}

fn record_import(
    report: &mut InspectionReport,
    name: &str,
    tag: Option<String>,
    member: Option<&str>,
) {
    let symbol = match tag {
        Some(tag) => VersionedSymbol::with_tag(name, &tag, SymbolBinding::Hidden),
        None => match VersionedSymbol::parse(name) {
            Ok(symbol) => symbol,
            Err(err) => {
                debug!(%name, %err, "skipping unparsable import");
                return;
            }
        },
    };
    report.push_import(Import {
        version: symbol.glibc_version(),
        symbol,
        member: member.map(str::to_string),
    });
}

/// Maps an ELF machine to the `CARGO_CFG_TARGET_ARCH` spelling.
fn cargo_arch(architecture: Architecture) -> Option<&'static str> {
    let arch = match architecture {
        Architecture::X86_64 => "x86_64",
        Architecture::I386 => "x86",
        Architecture::Aarch64 => "aarch64",
        Architecture::Arm => "arm",
        Architecture::PowerPc => "powerpc",
        Architecture::PowerPc64 => "powerpc64",
        Architecture::S390x => "s390x",
        Architecture::Sparc64 => "sparc64",
        Architecture::Mips => "mips",
        Architecture::Mips64 => "mips64",
        Architecture::Riscv64 => "riscv64",
        Architecture::LoongArch64 => "loongarch64",
        _ => return None,
    };
    Some(arch)
}
