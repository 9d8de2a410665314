//! Build a requirements file programmatically using the builder API.

use requirements_txt::{Command, Operator, Package, Requirement};

fn main() {
    let requirement = Requirement::new()
        .command(Command::long("index-url").with_argument("https://pypi.org/simple"))
        .command(Command::short("r").with_argument("base.txt"))
        .package(
            Package::new("numpy")
                .version(Operator::GreaterEqual, "1.23.5")
                .version(Operator::Less, "2"),
        )
        .package(
            Package::new("pywin32")
                .version(Operator::Equal, "306")
                .environ("sys_platform", Operator::Equal, "win32"),
        )
        .package(
            Package::new("urllib3")
                .extra("security")
                .download("https://example.com/urllib3.zip"),
        );

    print!("{}", requirements_txt::format(&requirement));
}
