use command_line::{Outcome, PositionalSpec, Registry, RegistryError, ValueType};

fn main() -> Result<(), RegistryError> {
    let mut registry = Registry::new("summer");
    registry
        .register_positional(
            PositionalSpec::new("item", ValueType::Integer)
                .variadic()
                .help("The items to sum."),
        )?;
    let parser = registry.freeze().parser();

    match parser.parse_env() {
        Ok(Outcome::Parsed(result)) => {
            let sum: i64 = result.values("item").iter().filter_map(|v| v.as_integer()).sum();
            println!("Sum: {sum}");
        }
        Ok(Outcome::Help(message)) => println!("{message}"),
        Err(error) => {
            let tokens: Vec<String> = std::env::args().skip(1).collect();
            eprintln!("{error}");
            eprintln!("{}", error.context(&tokens));
            std::process::exit(1);
        }
    }

    Ok(())
}
