//! Thin interactive reference harness over [`exos2_mount_driver`]'s public
//! operations. Not part of the core driver — a demo of wiring a real
//! [`SerialPortDevice`] into a [`MountController`] and driving it from a
//! terminal menu.

use exos2_mount_driver::{Direction, MountController, SerialPortDevice};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
    line.trim().to_string()
}

fn prompt_f32(label: &str) -> Option<f32> {
    prompt(label).parse().ok()
}

fn print_menu() {
    println!();
    println!("1) Start");
    println!("2) Stop");
    println!("3) Park");
    println!("4) GoTo ra dec");
    println!("5) Sync ra dec");
    println!("6) Set site location lat lon");
    println!("7) Request site location");
    println!("8) Stop motion");
    println!("9) Start motion to direction rate");
    println!("10) Stop motion to direction");
    println!("11) Show pointing coordinates");
    println!("12) Show telescope state");
    println!("13) Show site location");
    println!("0) Quit");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(device_path) = args.next() else {
        eprintln!("usage: exos2-cli <serial-device>");
        return ExitCode::FAILURE;
    };

    let config = exos2_mount_driver::config::load().unwrap_or_default();
    let baud_rate = config.com.baud_rate;
    let timeout = Duration::from_millis(config.com.timeout_millis);

    let serial = SerialPortDevice::new(device_path, baud_rate, timeout);
    let controller = MountController::new(Box::new(serial));

    loop {
        print_menu();
        match prompt("> ").as_str() {
            "1" => controller.start(),
            "2" => controller.stop(),
            "3" => report(controller.park_position()),
            "4" => {
                if let (Some(ra), Some(dec)) = (prompt_f32("ra: "), prompt_f32("dec: ")) {
                    report(controller.go_to(ra, dec));
                }
            }
            "5" => {
                if let (Some(ra), Some(dec)) = (prompt_f32("ra: "), prompt_f32("dec: ")) {
                    report(controller.sync(ra, dec));
                }
            }
            "6" => {
                if let (Some(lat), Some(lon)) = (prompt_f32("lat: "), prompt_f32("lon: ")) {
                    report(controller.set_site_location(lat, lon));
                }
            }
            "7" => report(controller.request_site_location()),
            "8" => report(controller.stop_motion()),
            "9" => {
                let direction = match prompt("direction (n/s/e/w): ").as_str() {
                    "n" => Direction::North,
                    "s" => Direction::South,
                    "e" => Direction::East,
                    "w" => Direction::West,
                    _ => {
                        println!("unrecognized direction");
                        continue;
                    }
                };
                if let Some(rate) = prompt("rate (pulses/sec): ").parse().ok() {
                    report(controller.start_motion_to_direction(direction, rate));
                }
            }
            "10" => controller.stop_motion_to_direction(),
            "11" => println!("{:?}", controller.get_pointing_coordinates()),
            "12" => println!("{:?}", controller.get_telescope_state()),
            "13" => println!("{:?}", controller.get_site_location()),
            "0" => {
                controller.stop();
                return ExitCode::SUCCESS;
            }
            other => println!("unrecognized choice: {other}"),
        }
    }
}

fn report<T: std::fmt::Debug>(result: Result<T, exos2_mount_driver::DriverError>) {
    if let Err(e) = result {
        println!("error: {e}");
    }
}
