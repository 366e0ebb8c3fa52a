mod common;

use fuelcalc_lib::{EnvironmentState, Error, FuelPrice, MissionPreset, Store};

use common::{stored_vehicle, TestStore};

#[test]
fn vehicle_round_trip_and_update() {
    let env = TestStore::new();
    let mut vehicle = stored_vehicle("MYVI-01");
    vehicle.profile = vehicle.profile.with_ac(true).with_tire_pressure(2.2);
    env.store.add_vehicle(&vehicle).expect("add vehicle");

    assert!(env.store.vehicle_exists("MYVI-01").expect("exists query"));
    assert_eq!(env.store.load_vehicle("MYVI-01").expect("load"), vehicle);

    vehicle.model_name = "Myvi 1.5 AV".to_string();
    vehicle.profile.mass_kg = 1030.0;
    env.store.update_vehicle(&vehicle).expect("update vehicle");
    assert_eq!(env.store.load_vehicle("MYVI-01").expect("load"), vehicle);
}

#[test]
fn duplicate_vehicle_is_rejected() {
    let env = TestStore::new();
    env.store.add_vehicle(&stored_vehicle("V1")).expect("add");

    let err = env
        .store
        .add_vehicle(&stored_vehicle("V1"))
        .expect_err("duplicate id");
    assert!(matches!(err, Error::DuplicateVehicle { id } if id == "V1"));
}

#[test]
fn unknown_vehicle_suggests_close_ids() {
    let env = TestStore::new();
    env.store.add_vehicle(&stored_vehicle("HILUX-01")).expect("add");
    env.store.add_vehicle(&stored_vehicle("AXIA-07")).expect("add");

    match env.store.load_vehicle("HILUX-1") {
        Err(Error::UnknownVehicle { id, suggestions }) => {
            assert_eq!(id, "HILUX-1");
            assert_eq!(suggestions, vec!["HILUX-01".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn delete_vehicle_removes_it_from_listing() {
    let env = TestStore::new();
    env.store.add_vehicle(&stored_vehicle("B")).expect("add");
    env.store.add_vehicle(&stored_vehicle("A")).expect("add");

    let ids: Vec<_> = env
        .store
        .list_vehicles()
        .expect("list")
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec!["A", "B"]);

    env.store.delete_vehicle("A").expect("delete");
    assert!(!env.store.vehicle_exists("A").expect("exists query"));
    assert!(matches!(
        env.store.delete_vehicle("A"),
        Err(Error::UnknownVehicle { .. })
    ));
}

#[test]
fn invalid_vehicle_is_not_stored() {
    let env = TestStore::new();
    let mut vehicle = stored_vehicle("BAD");
    vehicle.profile.rated_power_kw = -5.0;

    assert!(matches!(
        env.store.add_vehicle(&vehicle),
        Err(Error::InvalidInput { .. })
    ));
    assert!(env.store.list_vehicles().expect("list").is_empty());
}

#[test]
fn preset_keeps_optional_pressure() {
    let env = TestStore::new();
    let highland = MissionPreset {
        name: "cameron-highlands".to_string(),
        terrain: "mountain".to_string(),
        climate: "cold".to_string(),
        environment: EnvironmentState {
            pressure_pa: 85_000.0,
            ..EnvironmentState::raw(0.06, 1.3, 14.0)
        },
    };
    let coast = MissionPreset {
        name: "coastal".to_string(),
        terrain: "plain".to_string(),
        climate: "hot".to_string(),
        environment: EnvironmentState::raw(0.0, 1.0, 33.0),
    };
    env.store.save_preset(&highland).expect("save");
    env.store.save_preset(&coast).expect("save");

    assert_eq!(env.store.load_preset("cameron-highlands").expect("load"), highland);
    let loaded = env.store.load_preset("coastal").expect("load");
    assert_eq!(loaded.environment.pressure_pa, 101_325.0);

    let names: Vec<_> = env
        .store
        .list_presets()
        .expect("list")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["cameron-highlands", "coastal"]);
}

#[test]
fn saving_preset_twice_replaces_it() {
    let env = TestStore::new();
    let mut preset = MissionPreset {
        name: "daily".to_string(),
        terrain: "urban".to_string(),
        climate: "clear".to_string(),
        environment: EnvironmentState::raw(0.0, 1.1, 27.0),
    };
    env.store.save_preset(&preset).expect("save");
    preset.climate = "rainy".to_string();
    env.store.save_preset(&preset).expect("save again");

    assert_eq!(env.store.list_presets().expect("list").len(), 1);
    assert_eq!(env.store.load_preset("daily").expect("load").climate, "rainy");

    env.store.delete_preset("daily").expect("delete");
    assert!(matches!(
        env.store.load_preset("daily"),
        Err(Error::UnknownPreset { .. })
    ));
}

#[test]
fn fuel_price_latest_row_wins() {
    let env = TestStore::new();
    assert_eq!(env.store.load_fuel_price().expect("load"), None);

    env.store
        .save_fuel_price(FuelPrice::new(2.05).unwrap())
        .expect("save");
    env.store
        .save_fuel_price(FuelPrice::new(2.60).unwrap())
        .expect("save");

    let price = env.store.load_fuel_price().expect("load").expect("price stored");
    assert_eq!(price.get(), 2.60);
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("fuelcalc.db");
    {
        let store = Store::open(&path).expect("open");
        store.add_vehicle(&stored_vehicle("KEEP")).expect("add");
    }
    let store = Store::open(&path).expect("reopen");
    assert!(store.vehicle_exists("KEEP").expect("exists query"));
}
