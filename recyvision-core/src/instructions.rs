//! Per-category recycling guidance shown after a scan is classified.

/// Handling guidance for one waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecyclingInstruction {
    /// Human-readable category name.
    pub category: &'static str,
    /// Preparation steps before disposal.
    pub instructions: &'static [&'static str],
    /// Situational hints.
    pub tips: &'static [&'static str],
    /// Where the item ultimately goes.
    pub disposal: &'static str,
}

/// Guidance for items no category matched.
pub const UNKNOWN_ITEM: RecyclingInstruction = RecyclingInstruction {
    category: "Unknown Item",
    instructions: &[
        "Look for recycling symbols or material markings",
        "Check if it can be disassembled into recyclable parts",
        "Keep it separate from other recyclables",
    ],
    tips: &[
        "Take photos of any recycling symbols or labels",
        "When in doubt, contact local recycling authorities",
    ],
    disposal: "Contact your local recycling center for guidance",
};

/// Guidance table, keyed by normalized category label.
const INSTRUCTIONS: [(&str, RecyclingInstruction); 29] = [
    (
        "battery",
        RecyclingInstruction {
            category: "Battery",
            instructions: &[
                "Do not throw in regular trash",
                "Place in a sealed plastic bag",
                "Label clearly if rechargeable or lithium",
            ],
            tips: &[
                "Use collection boxes at electronics or grocery stores",
                "Avoid puncturing batteries",
                "Store in a cool, dry place until disposal",
            ],
            disposal: "Take to designated battery recycling bins or electronic waste collection points",
        },
    ),
    (
        "biological",
        RecyclingInstruction {
            category: "Biological Waste",
            instructions: &[
                "Wrap securely to avoid leakage",
                "Label if medical waste",
                "Do not place in recycling bins",
            ],
            tips: &[
                "Use compost bins for food-related biological waste",
                "Dispose of medical waste at health centers",
            ],
            disposal: "Place in general waste or bio-waste bins if available",
        },
    ),
    (
        "blister_pack",
        RecyclingInstruction {
            category: "Blister Pack",
            instructions: &[
                "Separate plastic from foil if possible",
                "Clean before disposal",
            ],
            tips: &[
                "May not be recyclable curbside",
                "Take to special collection if available",
            ],
            disposal: "Dispose in general waste unless specialty recycling exists",
        },
    ),
    (
        "can",
        RecyclingInstruction {
            category: "Can",
            instructions: &["Rinse thoroughly", "Crush if possible to save space"],
            tips: &[
                "Cans are usually aluminum or steel, both recyclable",
                "Check for deposit refunds",
            ],
            disposal: "Place in metal recycling bins",
        },
    ),
    (
        "carton",
        RecyclingInstruction {
            category: "Carton",
            instructions: &["Rinse and flatten", "Remove plastic caps"],
            tips: &[
                "Check local rules, not all cartons are recyclable",
                "Can be part of beverage container recycling",
            ],
            disposal: "Place in designated carton recycling if available",
        },
    ),
    (
        "chip_bag",
        RecyclingInstruction {
            category: "Chip Bag",
            instructions: &["Empty all crumbs", "Do not tear"],
            tips: &[
                "Usually made of mixed materials, often non-recyclable",
                "Can be used in eco-brick projects",
            ],
            disposal: "Dispose in general waste bin",
        },
    ),
    (
        "clear_plastic_bottle",
        RecyclingInstruction {
            category: "Clear Plastic Bottle",
            instructions: &["Empty and rinse", "Remove labels and caps"],
            tips: &["PET bottles are widely accepted", "Check for recycling logos"],
            disposal: "Place in plastic recycling bin",
        },
    ),
    (
        "condiment_container",
        RecyclingInstruction {
            category: "Condiment Container",
            instructions: &["Rinse well to remove residue", "Check for recycling symbol"],
            tips: &[
                "May be recyclable depending on plastic type",
                "Avoid oily containers if not cleanable",
            ],
            disposal: "Recycle if accepted locally, otherwise dispose as general waste",
        },
    ),
    (
        "cup",
        RecyclingInstruction {
            category: "Cup",
            instructions: &["Rinse before disposal", "Separate lid if different material"],
            tips: &[
                "Paper cups often have plastic lining, check local rules",
                "Plastic cups are more widely accepted",
            ],
            disposal: "Recycle if compatible, or dispose in general waste",
        },
    ),
    (
        "drink_can",
        RecyclingInstruction {
            category: "Drink Can",
            instructions: &["Rinse and crush"],
            tips: &["Often part of deposit refund programs"],
            disposal: "Place in aluminum recycling bin",
        },
    ),
    (
        "food_waste",
        RecyclingInstruction {
            category: "Food Waste",
            instructions: &["Remove packaging", "Drain liquids"],
            tips: &["Compost if possible", "Avoid mixing with recyclables"],
            disposal: "Place in organic waste bin or compost",
        },
    ),
    (
        "glass",
        RecyclingInstruction {
            category: "Glass",
            instructions: &["Rinse and sort by color"],
            tips: &["No ceramics or mirrors"],
            disposal: "Place in color-coded glass recycling bins",
        },
    ),
    (
        "glass_bottle",
        RecyclingInstruction {
            category: "Glass Bottle",
            instructions: &["Remove lid", "Rinse"],
            tips: &["Refundable in some regions"],
            disposal: "Recycle in glass bin by color",
        },
    ),
    (
        "hard_plastic",
        RecyclingInstruction {
            category: "Hard Plastic",
            instructions: &["Rinse and dry", "Remove labels"],
            tips: &["Check for type (HDPE, LDPE, etc.)"],
            disposal: "Recycle if accepted",
        },
    ),
    (
        "lid",
        RecyclingInstruction {
            category: "Lid",
            instructions: &["Separate from container", "Sort by material"],
            tips: &["Small lids can get lost in recycling, collect in a larger container"],
            disposal: "Recycle with appropriate material or general waste",
        },
    ),
    (
        "magazine_paper",
        RecyclingInstruction {
            category: "Magazine Paper",
            instructions: &["Bundle together", "Keep dry"],
            tips: &["Remove plastic covers"],
            disposal: "Place in paper recycling bin",
        },
    ),
    (
        "metal",
        RecyclingInstruction {
            category: "Metal",
            instructions: &["Clean and dry", "Separate types if possible"],
            tips: &["Aluminum is widely recycled"],
            disposal: "Take to metal recycling",
        },
    ),
    (
        "other_plastic",
        RecyclingInstruction {
            category: "Other Plastic",
            instructions: &["Check for recycling code", "Clean thoroughly"],
            tips: &["Mixed plastics may not be accepted"],
            disposal: "Recycle if accepted, otherwise general waste",
        },
    ),
    (
        "paper",
        RecyclingInstruction {
            category: "Paper",
            instructions: &["Remove staples", "Keep clean and dry"],
            tips: &["Bundle or place in bags"],
            disposal: "Paper recycling bin",
        },
    ),
    (
        "paper_bag",
        RecyclingInstruction {
            category: "Paper Bag",
            instructions: &["Remove food residue", "Flatten"],
            tips: &["Compost if food-stained"],
            disposal: "Recycle or compost",
        },
    ),
    (
        "paper_cup",
        RecyclingInstruction {
            category: "Paper Cup",
            instructions: &["Check for lining", "Rinse"],
            tips: &["May not be recyclable everywhere"],
            disposal: "Recycle or general waste",
        },
    ),
    (
        "plastic_bag",
        RecyclingInstruction {
            category: "Plastic Bag",
            instructions: &["Empty and flatten"],
            tips: &["Often recyclable at grocery stores"],
            disposal: "Special collection or general waste",
        },
    ),
    (
        "plastic_container",
        RecyclingInstruction {
            category: "Plastic Container",
            instructions: &["Rinse and dry", "Remove labels"],
            tips: &["Check for recycling code"],
            disposal: "Recycle if accepted",
        },
    ),
    (
        "plastic_cup",
        RecyclingInstruction {
            category: "Plastic Cup",
            instructions: &["Clean before recycling"],
            tips: &["Not always accepted"],
            disposal: "Recycle or general waste",
        },
    ),
    (
        "plastic_utensils",
        RecyclingInstruction {
            category: "Plastic Utensils",
            instructions: &["Clean thoroughly"],
            tips: &["Often non-recyclable"],
            disposal: "Dispose in general waste",
        },
    ),
    (
        "straw",
        RecyclingInstruction {
            category: "Straw",
            instructions: &["Dispose directly"],
            tips: &["Not recyclable"],
            disposal: "General waste bin",
        },
    ),
    (
        "styrofoam",
        RecyclingInstruction {
            category: "Styrofoam",
            instructions: &["Break into smaller pieces"],
            tips: &["Usually non-recyclable"],
            disposal: "Dispose in general waste",
        },
    ),
    (
        "aluminium_foil",
        RecyclingInstruction {
            category: "Aluminium Foil",
            instructions: &["Clean off food residue", "Ball it up"],
            tips: &["Small pieces should be balled together"],
            disposal: "Recycle if clean",
        },
    ),
    (
        "cardboard",
        RecyclingInstruction {
            category: "Cardboard",
            instructions: &["Flatten and keep dry", "Remove tape"],
            tips: &["Tie in bundles"],
            disposal: "Cardboard recycling bin",
        },
    ),
];

/// Look up the guidance for a predicted label.
///
/// Labels are normalized (lowercased, spaces to underscores) and matched
/// against the table keys first; labels finer than the table, such as
/// `plastic_water_bottles` or `styrofoam_cups`, fall back to a coarse
/// keyword match. Anything still unmatched gets [`UNKNOWN_ITEM`].
#[must_use]
pub fn instructions_for(label: &str) -> &'static RecyclingInstruction {
    let normalized = label.trim().to_lowercase().replace(' ', "_");

    if let Some((_, instruction)) = INSTRUCTIONS
        .iter()
        .find(|(key, _)| *key == normalized)
    {
        return instruction;
    }

    match coarse_key(&normalized) {
        Some(coarse) => INSTRUCTIONS
            .iter()
            .find(|(key, _)| *key == coarse)
            .map_or(&UNKNOWN_ITEM, |(_, instruction)| instruction),
        None => &UNKNOWN_ITEM,
    }
}

/// Map a fine-grained model label onto a table key. Ordered from specific
/// materials to generic ones so e.g. `plastic_cup_lids` lands on `lid`
/// rather than `plastic_cup`.
fn coarse_key(normalized: &str) -> Option<&'static str> {
    if normalized.contains("battery") || normalized.contains("batteries") {
        Some("battery")
    } else if normalized.contains("foil") {
        Some("aluminium_foil")
    } else if normalized.contains("styrofoam") {
        Some("styrofoam")
    } else if normalized.contains("straw") {
        Some("straw")
    } else if normalized.contains("lid") {
        Some("lid")
    } else if normalized.contains("cutlery") || normalized.contains("utensil") {
        Some("plastic_utensils")
    } else if normalized.contains("tea") || normalized.contains("coffee") || normalized.contains("eggshell") {
        Some("food_waste")
    } else if normalized.contains("bag") {
        Some("plastic_bag")
    } else if normalized.contains("cardboard") {
        Some("cardboard")
    } else if normalized.contains("carton") {
        Some("carton")
    } else if normalized.contains("glass") && normalized.contains("bottle") {
        Some("glass_bottle")
    } else if normalized.contains("glass") {
        Some("glass")
    } else if normalized.contains("bottle") {
        Some("clear_plastic_bottle")
    } else if normalized.contains("cup") {
        Some("cup")
    } else if normalized.contains("can") {
        Some("can")
    } else if normalized.contains("magazine") {
        Some("magazine_paper")
    } else if normalized.contains("paper") {
        Some("paper")
    } else if normalized.contains("container") {
        Some("plastic_container")
    } else if normalized.contains("metal") {
        Some("metal")
    } else if normalized.contains("food") {
        Some("food_waste")
    } else if normalized.contains("plastic") {
        Some("other_plastic")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_labels_resolve_to_their_category() {
        assert_eq!(instructions_for("glass_bottle").category, "Glass Bottle");
        assert_eq!(instructions_for("cardboard").category, "Cardboard");
        assert_eq!(instructions_for("battery").category, "Battery");
    }

    #[test]
    fn labels_are_normalized_before_lookup() {
        assert_eq!(instructions_for("Glass Bottle").category, "Glass Bottle");
        assert_eq!(instructions_for("  Plastic Bag  ").category, "Plastic Bag");
    }

    #[test]
    fn fine_grained_model_labels_map_to_a_coarse_category() {
        assert_eq!(
            instructions_for("plastic_water_bottles").category,
            "Clear Plastic Bottle"
        );
        assert_eq!(instructions_for("glass_food_jars").category, "Glass");
        assert_eq!(
            instructions_for("glass_beverage_bottles").category,
            "Glass Bottle"
        );
        assert_eq!(instructions_for("styrofoam_cups").category, "Styrofoam");
        assert_eq!(instructions_for("plastic_cup_lids").category, "Lid");
        assert_eq!(instructions_for("aluminum_soda_cans").category, "Can");
        assert_eq!(instructions_for("tea_bags").category, "Food Waste");
        assert_eq!(instructions_for("office_paper").category, "Paper");
    }

    #[test]
    fn unmatched_labels_get_the_unknown_fallback() {
        assert_eq!(instructions_for("unknown"), &UNKNOWN_ITEM);
        assert_eq!(instructions_for("clothing"), &UNKNOWN_ITEM);
        assert_eq!(instructions_for(""), &UNKNOWN_ITEM);
    }

    #[test]
    fn every_entry_carries_complete_guidance() {
        for (key, instruction) in &INSTRUCTIONS {
            assert!(!instruction.instructions.is_empty(), "no steps for {key}");
            assert!(!instruction.tips.is_empty(), "no tips for {key}");
            assert!(!instruction.disposal.is_empty(), "no disposal for {key}");
        }
    }
}
