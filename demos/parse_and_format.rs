//! Parse a requirements.txt string and re-format it.

fn main() {
    let input = "\
# runtime
contourpy [bold, mega] >1.0.6, <=1.1.2; python_version >= \"3.6\"
urllib3 [security] @ https://example.com/urllib3.zip; platform_system != \"AIX\"

--no-binary
-r requirements-dev.txt
https://example.com/vendored.zip
";

    let requirement = requirements_txt::parse_str(input).expect("parse failed");

    println!("Lines: {}", requirement.lines.len());
    for package in requirement.packages() {
        println!("  Package: {}", package.name);
        for version in &package.versions {
            println!("    Version: {}{}", version.operator, version.value);
        }
    }
    for command in requirement.commands() {
        println!("  Option: {}", command.name());
    }

    let output = requirements_txt::format(&requirement);
    println!("\nFormatted output:\n{output}");
}
