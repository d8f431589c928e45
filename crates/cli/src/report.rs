//! Inspection report.
use std::fmt;

use anyhow::Result;
use serde::Serialize;
use storage_core::{Container, ContainerFactory, StorageEnv, World};
use storage_runtime::{CraftFromChest, CraftingRequest, Feature, ResizeChest};

#[derive(Debug, Serialize)]
pub struct StorageRow {
    pub key: String,
    pub kind: String,
    pub name: String,
    pub location: Option<String>,
    pub tile: Option<(i32, i32)>,
    pub items: usize,
    pub capacity: u32,
    pub menu_rows: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CraftingRow {
    pub farmer: String,
    pub storages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub storages: Vec<StorageRow>,
    pub craft_from_chest_active: bool,
    pub crafting: Vec<CraftingRow>,
}

pub fn build(
    world: &World,
    factory: &ContainerFactory<'_>,
    env: &StorageEnv<'_>,
    only_farmer: Option<&str>,
) -> Result<Report> {
    let resize = ResizeChest::new(factory);
    let storages = factory
        .get_all(world, |_| true)
        .map(|container| storage_row(world, env, &resize, &container))
        .collect::<Result<Vec<_>>>()?;

    let craft = CraftFromChest::new(factory);
    let mut crafting = Vec::new();
    if craft.should_be_active() {
        for (id, farmer) in world.farmers() {
            if only_farmer.is_some_and(|name| name != farmer.name) {
                continue;
            }
            let storages = craft
                .populate_containers(world, CraftingRequest::at_farmer(id))?
                .into_iter()
                .map(|(container, _)| container.storage_key().to_string())
                .collect();
            crafting.push(CraftingRow {
                farmer: farmer.name.clone(),
                storages,
            });
        }
    }

    Ok(Report {
        storages,
        craft_from_chest_active: craft.should_be_active(),
        crafting,
    })
}

fn storage_row(
    world: &World,
    env: &StorageEnv<'_>,
    resize: &ResizeChest<'_>,
    container: &Container,
) -> Result<StorageRow> {
    let position = container.position(world).ok();
    Ok(StorageRow {
        key: container.storage_key().to_string(),
        kind: container.kind().to_string(),
        name: container.display_name(world, env)?,
        location: position
            .and_then(|(id, _)| world.location(id))
            .map(|location| location.name.clone()),
        tile: position.map(|(_, tile)| (tile.x, tile.y)),
        items: container.items(world)?.len(),
        capacity: container.capacity(world)?,
        menu_rows: resize.menu_rows(world, container)?,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "storages ({}):", self.storages.len())?;
        for row in &self.storages {
            let place = match (&row.location, row.tile) {
                (Some(location), Some((x, y))) => format!("{location} ({x}, {y})"),
                _ => "nowhere".to_owned(),
            };
            writeln!(
                f,
                "  {:<12} {:<8} {:<20} {:<24} {}/{}",
                row.key, row.kind, row.name, place, row.items, row.capacity
            )?;
        }
        if !self.craft_from_chest_active {
            return writeln!(f, "craft from chest: disabled");
        }
        for row in &self.crafting {
            writeln!(f, "crafting for {}: {}", row.farmer, row.storages.join(", "))?;
        }
        Ok(())
    }
}
