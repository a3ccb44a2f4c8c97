use clap::{Arg, ArgAction, Command};
use xv11_driver::{run_driver, to_hex_string};

struct Options {
    port_name: String,
    json: bool,
}

fn get_options() -> Options {
    let matches = Command::new("XV11 frame reader.")
        .about("Reads frames from an XV11 LiDAR and reports whether each one is valid.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .use_value_delimiter(false)
                .required(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print every verdict as a JSON line")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    Options {
        port_name: port_name.to_string(),
        json: matches.get_flag("json"),
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let options = get_options();

    let (driver_threads, verdict_rx) = match run_driver(&options.port_name) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Failed to open \"{}\". Error: {}", options.port_name, e);
            std::process::exit(1);
        }
    };

    let (mut n_good, mut n_bad) = (0usize, 0usize);
    while let Ok(verdict) = verdict_rx.recv() {
        if verdict.valid {
            n_good += 1;
        } else {
            n_bad += 1;
        }

        if options.json {
            println!("{}", serde_json::to_string(&verdict).unwrap());
        } else {
            let bytes = to_hex_string(verdict.frame.as_bytes());
            let label = if verdict.valid { "good" } else { "bad" };
            println!("{label} {bytes} ({n_good} good, {n_bad} bad)");
        }
    }

    drop(driver_threads);
}
