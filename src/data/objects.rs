use crate::shared::*;

struct Placement {
    id: &'static str,
    name: &'static str,
    kind: ObjectKind,
    rect: WorldRect,
    floor: Floor,
    range: f32,
    sprite: &'static str,
}

const fn at(x: f32, y: f32, w: f32, h: f32) -> WorldRect {
    WorldRect::new(x, y, w, h)
}

const fn to(floor: Floor) -> ObjectKind {
    ObjectKind::FloorTransition { to: floor }
}

const fn exit(cost: u32, method: PaymentMethod) -> ObjectKind {
    ObjectKind::Exit { cost, method }
}

use crate::shared::Floor::{First, Ground, Second};
use crate::shared::ObjectKind::{Bin, CashMachine, Decoration, InfoPoint, Npc, Shop};

const PLACEMENTS: &[Placement] = &[
    // ── G/F ──────────────────────────────────────────────────────────
    Placement { id: "mcd", name: "McDonald's", kind: Shop, rect: at(0.0, 0.0, 200.0, 200.0), floor: Ground, range: 160.0, sprite: "shop_mcd_detailed" },
    Placement { id: "toilets_gf", name: "Toilets", kind: Decoration, rect: at(600.0, 0.0, 200.0, 200.0), floor: Ground, range: 160.0, sprite: "toilets_detailed" },
    Placement { id: "elev_gf", name: "Elevator", kind: to(Second), rect: at(280.0, 0.0, 100.0, 120.0), floor: Ground, range: 80.0, sprite: "elevator_detailed" },
    Placement { id: "info_desk", name: "Info Desk", kind: InfoPoint, rect: at(420.0, 0.0, 140.0, 100.0), floor: Ground, range: 100.0, sprite: "info_desk_detailed" },
    Placement { id: "exit_mtr", name: "MTR Station", kind: exit(12, PaymentMethod::Octopus), rect: at(0.0, 260.0, 60.0, 80.0), floor: Ground, range: 60.0, sprite: "mtr_detailed" },
    Placement { id: "esc_gf_up", name: "Escalator Up", kind: to(First), rect: at(340.0, 260.0, 60.0, 80.0), floor: Ground, range: 60.0, sprite: "esc_up_detailed" },
    Placement { id: "esc_gf_down", name: "Escalator Down", kind: Decoration, rect: at(410.0, 260.0, 60.0, 80.0), floor: Ground, range: 60.0, sprite: "esc_down_detailed" },
    Placement { id: "exit_bus", name: "Bus Station", kind: exit(6, PaymentMethod::Octopus), rect: at(740.0, 260.0, 60.0, 80.0), floor: Ground, range: 60.0, sprite: "bus_detailed" },
    Placement { id: "yamazaki_bakery", name: "Yamazaki Bakery", kind: Shop, rect: at(0.0, 400.0, 200.0, 200.0), floor: Ground, range: 160.0, sprite: "shop_bakery_detailed" },
    Placement { id: "711", name: "7-Eleven", kind: Shop, rect: at(600.0, 400.0, 200.0, 200.0), floor: Ground, range: 160.0, sprite: "shop_711_detailed" },
    Placement { id: "exit_main", name: "Main Entrance", kind: exit(0, PaymentMethod::Free), rect: at(360.0, 530.0, 80.0, 60.0), floor: Ground, range: 70.0, sprite: "exit_detailed" },
    Placement { id: "hsbc_atm", name: "HSBC ATM", kind: CashMachine, rect: at(500.0, 500.0, 80.0, 100.0), floor: Ground, range: 80.0, sprite: "atm_detailed" },
    Placement { id: "bin_gf_1", name: "Bin", kind: Bin, rect: at(295.0, 280.0, 40.0, 40.0), floor: Ground, range: 50.0, sprite: "bin_detailed" },
    Placement { id: "bin_gf_2", name: "Bin", kind: Bin, rect: at(475.0, 280.0, 40.0, 40.0), floor: Ground, range: 50.0, sprite: "bin_detailed" },
    Placement { id: "plant_gf_1", name: "Plant", kind: Decoration, rect: at(310.0, 540.0, 40.0, 60.0), floor: Ground, range: 0.0, sprite: "plant_detailed" },
    Placement { id: "plant_gf_2", name: "Plant", kind: Decoration, rect: at(450.0, 540.0, 40.0, 60.0), floor: Ground, range: 0.0, sprite: "plant_detailed" },
    Placement { id: "bench_gf_1", name: "Bench", kind: Decoration, rect: at(215.0, 540.0, 80.0, 40.0), floor: Ground, range: 0.0, sprite: "bench_detailed" },
    // ── 1/F — retail ─────────────────────────────────────────────────
    Placement { id: "mannings", name: "Mannings", kind: Shop, rect: at(0.0, 0.0, 200.0, 160.0), floor: First, range: 120.0, sprite: "shop_teal" },
    Placement { id: "guard_1f", name: "Guard", kind: Npc, rect: at(220.0, 100.0, 48.0, 64.0), floor: First, range: 60.0, sprite: "guard" },
    Placement { id: "esc_1f_up", name: "Escalator Up", kind: to(Second), rect: at(340.0, 260.0, 60.0, 80.0), floor: First, range: 60.0, sprite: "esc_up_detailed" },
    Placement { id: "esc_1f_down", name: "Escalator Down", kind: to(Ground), rect: at(410.0, 260.0, 60.0, 80.0), floor: First, range: 60.0, sprite: "esc_down_detailed" },
    Placement { id: "bin_1f_1", name: "Bin", kind: Bin, rect: at(200.0, 500.0, 40.0, 40.0), floor: First, range: 50.0, sprite: "bin_detailed" },
    Placement { id: "plant_1f_1", name: "Plant", kind: Decoration, rect: at(220.0, 20.0, 40.0, 60.0), floor: First, range: 0.0, sprite: "plant_detailed" },
    Placement { id: "bench_1f_1", name: "Bench", kind: Decoration, rect: at(100.0, 300.0, 80.0, 40.0), floor: First, range: 0.0, sprite: "bench_detailed" },
    // ── 2/F — food court ─────────────────────────────────────────────
    Placement { id: "dim_sum", name: "Dim Sum Palace", kind: Shop, rect: at(0.0, 0.0, 200.0, 160.0), floor: Second, range: 120.0, sprite: "shop_red" },
    Placement { id: "tai_hing", name: "Tai Hing", kind: Shop, rect: at(600.0, 0.0, 200.0, 160.0), floor: Second, range: 120.0, sprite: "shop_brown" },
    Placement { id: "elev_2f", name: "Elevator", kind: to(Ground), rect: at(280.0, 0.0, 100.0, 120.0), floor: Second, range: 80.0, sprite: "elevator_detailed" },
    Placement { id: "timothy", name: "Mr. Timothy", kind: Npc, rect: at(500.0, 100.0, 48.0, 64.0), floor: Second, range: 60.0, sprite: "timothy" },
    Placement { id: "esc_2f_up", name: "Escalator Up", kind: Decoration, rect: at(340.0, 260.0, 60.0, 80.0), floor: Second, range: 60.0, sprite: "esc_up_detailed" },
    Placement { id: "esc_2f_down", name: "Escalator Down", kind: to(First), rect: at(410.0, 260.0, 60.0, 80.0), floor: Second, range: 60.0, sprite: "esc_down_detailed" },
    Placement { id: "bin_2f_1", name: "Bin", kind: Bin, rect: at(400.0, 500.0, 40.0, 40.0), floor: Second, range: 50.0, sprite: "bin_detailed" },
    Placement { id: "bench_2f_1", name: "Bench", kind: Decoration, rect: at(100.0, 180.0, 80.0, 40.0), floor: Second, range: 0.0, sprite: "bench_detailed" },
    Placement { id: "bench_2f_2", name: "Bench", kind: Decoration, rect: at(620.0, 180.0, 80.0, 40.0), floor: Second, range: 0.0, sprite: "bench_detailed" },
    Placement { id: "plant_2f_1", name: "Plant", kind: Decoration, rect: at(300.0, 450.0, 40.0, 60.0), floor: Second, range: 0.0, sprite: "plant_detailed" },
];

/// Bins that hide one PIN digit each: (bin id, slot, digit).
/// The second G/F bin holds the fourth digit so every slot can be found.
const BIN_SECRETS: &[(&str, usize, u8)] = &[
    ("bin_gf_1", 0, 0),
    ("bin_1f_1", 1, 0),
    ("bin_2f_1", 2, 0),
    ("bin_gf_2", 3, 0),
];

pub fn populate_objects(catalog: &mut WorldCatalog) {
    catalog.objects = PLACEMENTS
        .iter()
        .map(|p| WorldObject {
            id: p.id.to_string(),
            name: p.name.to_string(),
            kind: p.kind,
            rect: p.rect,
            floor: p.floor,
            interact_range: p.range,
            sprite_key: p.sprite.to_string(),
        })
        .collect();

    for &(bin_id, slot, digit) in BIN_SECRETS {
        catalog
            .bin_secrets
            .insert(bin_id.to_string(), BinSecret { slot, digit });
    }
}
