//! Rendering of finished package records into CoApp-style `.autopkg`
//! package-definition documents.
//!
//! Compiling the documents into `.nupkg` files (Write-NuGetPackage) is an
//! external concern; this module only produces the text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::model::{Package, PackageConfig};

/// Render one package as an `.autopkg` document.
pub fn render_autopkg(package: &Package, toolchain: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// generated by qtpack-core {} at {}\n",
        crate::version(),
        Utc::now().to_rfc3339()
    ));
    out.push_str("nuget {\n");

    out.push_str("    nuspec {\n");
    out.push_str(&format!("        id = {};\n", package.id));
    out.push_str(&format!("        version : {};\n", package.version));
    out.push_str(&format!("        title: {};\n", package.name));
    out.push_str("        authors: {Qt Project};\n");
    out.push_str("        requireLicenseAcceptance: false;\n");
    out.push_str(&format!(
        "        summary: \"Qt redistributable binaries for {}\";\n",
        package.name
    ));
    out.push_str("        tags: {qt, native, redist};\n");
    out.push_str("    };\n");

    if !package.dependencies.is_empty() {
        out.push_str("\n    dependencies {\n");
        out.push_str("        packages : {\n");
        for dep in &package.dependencies {
            out.push_str(&format!("            {dep}-{toolchain}/{},\n", package.version));
        }
        out.push_str("        };\n");
        out.push_str("    };\n");
    }

    out.push_str("\n    files {\n");
    for config in &package.configurations {
        render_files_section(&mut out, config);
    }
    out.push_str("    };\n");

    out.push_str("}\n");
    out
}

fn render_files_section(out: &mut String, config: &PackageConfig) {
    out.push_str(&format!("        [{},{}] {{\n", config.arch, config.flavor));
    for (label, artifacts) in [
        ("bin", &config.binaries),
        ("symbols", &config.symbols),
        ("lib", &config.static_libs),
    ] {
        if artifacts.is_empty() {
            continue;
        }
        out.push_str(&format!("            {label}: {{\n"));
        for artifact in artifacts {
            out.push_str(&format!("                \"{}\",\n", artifact.path.display()));
        }
        out.push_str("            };\n");
    }
    out.push_str("        };\n");
}

/// Write the `.autopkg` document for `package` into `out_dir`, returning the
/// path written.
pub fn write_autopkg(package: &Package, toolchain: &str, out_dir: &Path) -> io::Result<PathBuf> {
    let path = out_dir.join(format!("{}.autopkg", package.id));
    fs::write(&path, render_autopkg(package, toolchain))?;
    Ok(path)
}
