//! Bind a struct to a group of parameters.

use cracon::{config_enum, Group, Param, SharedFile};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gear {
    Park,
    Drive,
    Reverse,
}

config_enum!(Gear: u8 { Park = 0, Drive = 1, Reverse = 2 });

struct Car {
    speed: Param<i64>,
    gear: Param<Gear>,
    motor_curve: Param<[i32; 4]>,
}

impl Car {
    fn new(group: &Group) -> Self {
        Self {
            speed: group.get_param("speed", 9000),
            gear: group.get_param("gear", Gear::Park),
            motor_curve: group.get_param("motor_curve", [0, 10, 20, 30]),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dir = std::env::temp_dir().join("cracon-group-param-usage");
    let _ = std::fs::create_dir_all(&dir);
    let config = SharedFile::new();
    if !config.init(dir.join("config.json"), dir.join("defaults.json")) {
        std::process::exit(1);
    }

    let mut car = Car::new(&config.get_group("vehicles").get_group("car"));
    println!(
        "speed {} gear {:?} curve {:?}",
        car.speed.get(),
        car.gear.get(),
        car.motor_curve.get_ref()
    );

    car.speed.set(1000);
    car.gear.set(Gear::Drive);
    {
        let mut curve = car.motor_curve.edit();
        curve[3] = 40;
    }

    if config.should_write() && !config.write() {
        std::process::exit(1);
    }
    println!("{} handles share {}", config.handle_count(), dir.display());
}
