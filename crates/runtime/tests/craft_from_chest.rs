use std::collections::BTreeSet;

use storage_core::{
    ContainerFactory, FarmerId, LocationId, RangeOption, RangeReference, StorageConfig, StorageOwner,
    Tile, World,
};
use storage_runtime::{CraftFromChest, CraftingRequest, Feature, OracleManager, Scenario};

const VALLEY: &str = r#"(
    locations: [
        (
            name: "Farm",
            objects: [
                (item_id: "(BC)130", name: "A", tile: Some((x: 1, y: 1)), capacity: Some(9), items: [
                    Stack(item_id: "(O)388", name: "Wood", quantity: 20),
                ]),
                (item_id: "(BC)130", name: "B", tile: Some((x: 2, y: 2)), capacity: Some(9)),
                (item_id: "(BC)130", name: "C", tile: Some((x: 30, y: 30)), capacity: Some(9),
                    items: [Stack(item_id: "(O)390", name: "Stone", quantity: 5)],
                    mod_data: { "storage-options/craft_from_chest_distance": "5" }),
                (item_id: "(BC)130", name: "D", tile: Some((x: 8, y: 8)), capacity: Some(9),
                    items: [Stack(item_id: "(O)390", name: "Stone", quantity: 5)],
                    mod_data: { "storage-options/craft_from_chest_distance": "5" }),
                (item_id: "(BC)130", name: "E", tile: Some((x: 3, y: 3)), capacity: Some(9),
                    items: [Stack(item_id: "(O)330", name: "Clay", quantity: 5)],
                    mod_data: { "storage-options/craft_from_chest": "disabled" }),
                (item_id: "(BC)208", name: "Workbench", kind: Workbench, tile: Some((x: 5, y: 6))),
            ],
        ),
        (
            name: "Town",
            objects: [
                (item_id: "(BC)130", name: "F", tile: Some((x: 0, y: 0)), capacity: Some(9),
                    items: [Stack(item_id: "(O)388", name: "Wood", quantity: 1)],
                    mod_data: { "storage-options/craft_from_chest": "world" }),
            ],
        ),
        (
            name: "UndergroundMine3",
            kind: MineShaft(level: 3),
            objects: [
                (item_id: "(BC)130", name: "G", tile: Some((x: 0, y: 0)), capacity: Some(9),
                    items: [Stack(item_id: "(O)378", name: "Copper Ore", quantity: 1)],
                    mod_data: { "storage-options/craft_from_chest": "world" }),
            ],
        ),
    ],
    farmers: [
        (name: "Abigail", location: "Farm", tile: (x: 5, y: 5), backpack: 12, items: [
            Storage((item_id: "(BC)130", name: "H", capacity: Some(9), items: [
                Stack(item_id: "(O)771", name: "Fiber", quantity: 3),
            ])),
        ]),
    ],
)"#;

fn valley() -> World {
    Scenario::parse(VALLEY).unwrap().build_world().unwrap()
}

fn config() -> StorageConfig {
    StorageConfig {
        craft_from_chest_disable_locations: vec!["UndergroundMine".to_owned()],
        ..StorageConfig::default()
    }
}

fn farmer(world: &World) -> FarmerId {
    world.farmers().next().unwrap().0
}

fn named(world: &World, names: &[&str]) -> BTreeSet<StorageOwner> {
    world
        .objects()
        .filter(|(_, object)| names.contains(&object.name.as_str()))
        .map(|(id, _)| StorageOwner::Object(id))
        .collect()
}

fn populate(world: &World, config: &StorageConfig, request: CraftingRequest) -> BTreeSet<StorageOwner> {
    let oracles = OracleManager::default();
    let factory = ContainerFactory::new(oracles.as_storage_env(), config);
    CraftFromChest::new(&factory)
        .populate_containers(world, request)
        .unwrap()
        .into_iter()
        .map(|(container, _)| container.storage_key())
        .collect()
}

fn farm(world: &World) -> LocationId {
    world.location_by_name("Farm").unwrap()
}

#[test]
fn ambient_crafting_uses_each_storage_range() {
    let world = valley();
    let found = populate(&world, &config(), CraftingRequest::at_farmer(farmer(&world)));

    assert_eq!(found, named(&world, &["A", "D", "F", "H"]));
}

#[test]
fn workbench_crafting_uses_global_range() {
    let world = valley();
    let request = CraftingRequest::at(farmer(&world), farm(&world), Tile::new(5, 6));
    let found = populate(&world, &config(), request);

    assert_eq!(found, named(&world, &["A", "C", "D", "H"]));
}

#[test]
fn inheriting_range_excludes_ambient_but_not_workbench() {
    let world = valley();
    let mut config = config();
    config.default_options.craft_from_chest = RangeOption::Default;

    let ambient = populate(&world, &config, CraftingRequest::at_farmer(farmer(&world)));
    assert_eq!(ambient, named(&world, &["F"]));

    let request = CraftingRequest::at(farmer(&world), farm(&world), Tile::new(5, 6));
    let workbench = populate(&world, &config, request);
    assert_eq!(workbench, named(&world, &["A", "C", "D", "H"]));
}

#[test]
fn excluded_reference_location_yields_nothing() {
    let mut world = valley();
    let id = farmer(&world);
    let mine = world.location_by_name("UndergroundMine3").unwrap();
    world.move_farmer(id, mine, Tile::ORIGIN).unwrap();

    let found = populate(&world, &config(), CraftingRequest::at_farmer(id));
    assert!(found.is_empty(), "found {found:?}");
}

#[test]
fn one_feature_instance_applies_exclusions_to_every_request() {
    let world = valley();
    let oracles = OracleManager::default();
    let config = config();
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);
    let craft = CraftFromChest::new(&factory);
    let id = farmer(&world);
    let mine = world.location_by_name("UndergroundMine3").unwrap();

    let from_farm = craft
        .populate_containers(&world, CraftingRequest::at_farmer(id))
        .unwrap();
    assert_eq!(from_farm.len(), 4);
    assert!(from_farm.iter().all(|(_, location)| *location != mine));

    let from_mine = craft
        .populate_containers(&world, CraftingRequest::at(id, mine, Tile::ORIGIN))
        .unwrap();
    assert!(from_mine.is_empty());

    let reference = RangeReference {
        farmer: Some(id),
        location: farm(&world),
        tile: Tile::new(5, 5),
    };
    let g = factory
        .get_all(&world, |container| {
            container.location(&world).is_ok_and(|location| location == mine)
        })
        .next()
        .unwrap();
    assert!(!craft.default_predicate(&world, &reference, &g));
}

#[test]
fn populated_pairs_carry_container_location() {
    let world = valley();
    let oracles = OracleManager::default();
    let config = config();
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);
    let feature = CraftFromChest::new(&factory);
    assert!(feature.should_be_active());

    let town = world.location_by_name("Town").unwrap();
    let pairs = feature
        .populate_containers(&world, CraftingRequest::at_farmer(farmer(&world)))
        .unwrap();
    assert_eq!(pairs.len(), 4);
    for (container, location) in pairs {
        assert!(!container.is_farmer());
        let expected = if named(&world, &["F"]).contains(&container.storage_key()) {
            town
        } else {
            farm(&world)
        };
        assert_eq!(location, expected);
    }
}

#[test]
fn disabled_root_turns_feature_off() {
    let oracles = OracleManager::default();
    let mut config = config();
    config.default_options.craft_from_chest = RangeOption::Disabled;
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);

    assert!(!CraftFromChest::new(&factory).should_be_active());
}
