use storage_core::{
    Container, ContainerFactory, FarmerId, RawHandle, StorageConfig, StorageOwner, Tile, World,
};
use storage_runtime::{CategorizeChest, OracleManager, Scenario, StashToChest};

const FARM: &str = r##"(
    locations: [
        (
            name: "Farm",
            objects: [
                (item_id: "(BC)130", name: "Wood Chest", tile: Some((x: 1, y: 1)), capacity: Some(9), items: [
                    Stack(item_id: "(O)388", name: "Wood", quantity: 20),
                ]),
                (item_id: "(BC)130", name: "Rock Chest", tile: Some((x: 2, y: 2)), capacity: Some(9),
                    mod_data: {
                        "storage-options/categorize_chest_search_term": "#stone_item",
                        "storage-options/stash_to_chest_priority": "1",
                    }),
                (item_id: "(BC)130", name: "Far Chest", tile: Some((x: 40, y: 40)), capacity: Some(9), items: [
                    Stack(item_id: "(O)330", name: "Clay", quantity: 1),
                ]),
            ],
        ),
    ],
    farmers: [
        (name: "Abigail", location: "Farm", tile: (x: 5, y: 5), backpack: 12, items: [
            Stack(item_id: "(O)388", name: "Wood", quantity: 30),
            Stack(item_id: "(O)390", name: "Stone", quantity: 10, tags: ["stone_item"]),
            Stack(item_id: "(O)330", name: "Clay", quantity: 5),
        ]),
        (name: "Sam", location: "Farm", tile: (x: 6, y: 6), backpack: 12),
    ],
)"##;

fn farm() -> World {
    Scenario::parse(FARM).unwrap().build_world().unwrap()
}

fn farmer_named(world: &World, name: &str) -> FarmerId {
    world
        .farmers()
        .find(|(_, state)| state.name == name)
        .map(|(id, _)| id)
        .unwrap()
}

fn chest(factory: &ContainerFactory<'_>, world: &World, tile: Tile) -> Container {
    let location = world.location_by_name("Farm").unwrap();
    let object = world.object_at(location, tile).unwrap();
    factory.try_get_one(world, RawHandle::Object(object)).unwrap()
}

fn quantity_of(world: &World, owner: StorageOwner, item_id: &str) -> u32 {
    world
        .inventory(owner)
        .unwrap()
        .iter()
        .filter(|item| item.item_id == item_id)
        .map(|item| item.quantity)
        .sum()
}

#[test]
fn stash_moves_held_and_categorized_items() {
    let mut world = farm();
    let oracles = OracleManager::default();
    let config = StorageConfig::default();
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);
    let abigail = farmer_named(&world, "Abigail");
    let wood_chest = chest(&factory, &world, Tile::new(1, 1)).storage_key();
    let rock_chest = chest(&factory, &world, Tile::new(2, 2)).storage_key();
    let far_chest = chest(&factory, &world, Tile::new(40, 40)).storage_key();

    let report = StashToChest::new(&factory).stash(&mut world, abigail).unwrap();

    assert_eq!(report.total(), 40);
    assert!(report.contended.is_empty());
    assert_eq!(quantity_of(&world, wood_chest, "(O)388"), 50);
    assert_eq!(quantity_of(&world, rock_chest, "(O)390"), 10);
    assert_eq!(quantity_of(&world, far_chest, "(O)330"), 1);
    let carried = StorageOwner::Farmer(abigail);
    assert_eq!(quantity_of(&world, carried, "(O)388"), 0);
    assert_eq!(quantity_of(&world, carried, "(O)330"), 5);
}

#[test]
fn stash_skips_storages_held_by_someone_else() {
    let mut world = farm();
    let oracles = OracleManager::default();
    let config = StorageConfig::default();
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);
    let abigail = farmer_named(&world, "Abigail");
    let sam = farmer_named(&world, "Sam");
    let wood_chest = chest(&factory, &world, Tile::new(1, 1));

    let held = wood_chest.lock(&world, sam).unwrap();
    let report = StashToChest::new(&factory).stash(&mut world, abigail).unwrap();
    drop(held);

    assert_eq!(report.contended, vec![wood_chest.storage_key()]);
    assert_eq!(report.total(), 10);
    assert_eq!(quantity_of(&world, StorageOwner::Farmer(abigail), "(O)388"), 30);
    assert!(!wood_chest.mutex(&world).unwrap().unwrap().is_locked());
}

#[test]
fn categorize_filter_round_trips_through_mod_data() {
    let mut world = farm();
    let oracles = OracleManager::default();
    let config = StorageConfig::default();
    let factory = ContainerFactory::new(oracles.as_storage_env(), &config);
    let categorize = CategorizeChest::new(&factory);
    let wood_chest = chest(&factory, &world, Tile::new(1, 1));
    let stone = storage_core::ItemStack::new("(O)390", "Stone", 1).with_tags(["stone_item"]);

    assert!(categorize.filter(&world, &wood_chest).unwrap().is_empty());

    categorize.set_filter(&mut world, &wood_chest, "  #stone_item ").unwrap();
    assert_eq!(
        wood_chest.mod_data(&world).unwrap().get("storage-options/categorize_chest_search_term"),
        Some("#stone_item")
    );
    assert!(categorize.accepts(&world, &wood_chest, &stone).unwrap());

    categorize.set_filter(&mut world, &wood_chest, "").unwrap();
    assert!(!wood_chest
        .mod_data(&world)
        .unwrap()
        .contains_key("storage-options/categorize_chest_search_term"));
    assert!(!categorize.accepts(&world, &wood_chest, &stone).unwrap());
}
