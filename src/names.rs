use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::UNIQUE_LABEL_ATTEMPTS;

/// Source of human-readable labels for nodes and route captions.
pub trait NameSupplier {
    fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    /// `count` labels with no uniqueness guarantee.
    fn supply<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        (0..count).map(|_| self.name(rng)).collect()
    }

    /// `count` labels that collide neither with each other nor with `taken`.
    /// Every issued label is added to `taken`.
    fn supply_distinct<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        taken: &mut HashSet<String>,
    ) -> Vec<String> {
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let mut candidate = self.name(rng);
            let mut attempts = 1;
            while taken.contains(&candidate) && attempts < UNIQUE_LABEL_ATTEMPTS {
                candidate = self.name(rng);
                attempts += 1;
            }
            if taken.contains(&candidate) {
                candidate = disambiguate(&candidate, taken);
            }
            taken.insert(candidate.clone());
            names.push(candidate);
        }
        names
    }
}

fn disambiguate(base: &str, taken: &HashSet<String>) -> String {
    let mut counter = 2;
    loop {
        let candidate = format!("{base} {counter}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Fantasy location names of the form
/// `<description><structure> <feature prefix> <feature suffix>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNames;

impl NameSupplier for LocationNames {
    fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let description = pick(rng, DESCRIPTIONS);
        let structure = pick(rng, STRUCTURES);
        let prefix = pick(rng, FEATURE_PREFIXES);
        let suffix = pick(rng, FEATURE_SUFFIXES);
        // hyphenated words attach to whatever follows them
        format!("{description}{structure} {prefix} {suffix}").replace("- ", "-")
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

const DESCRIPTIONS: &[&str] = &[
    "Adamantine ", "Aerial ", "Amphibious ", "Ancient ", "Arachnid ", "Astrological ",
    "Asymmetrical ", "Bizarre ", "Black ", "Bleak ", "Blue ", "Bronze ", "Buried ", "Celestial ",
    "Circuitous ", "Circular ", "Clay ", "Coiled ", "Collapsing ", "Concealed ", "Contaminated ",
    "Convoluted ", "Corroded ", "Criminal ", "Crimson ", "Crooked ", "Crude ", "Crumbling ",
    "Crystalline ", "Curious ", "Cursed ", "Cyclopean ", "Decaying ", "Deceptive ", "Decomposing ",
    "Defiled ", "Demolished ", "Demonic ", "Desolate ", "Destroyed ", "Devious ", "Diamond ",
    "Dilapidated ", "Disorienting ", "Divided ", "Dormant ", "Double ", "Dream-", "Earthen ",
    "Ebony ", "Eldritch ", "Elliptical ", "Enchanted ", "Enclosed ", "Entombed ", "Eroding ",
    "Ethereal ", "Fertile ", "Fortified ", "Fortress-", "Glittering ", "Grey ", "Hidden ", "High ",
    "Invulnerable ", "Isolated ", "Labyrinthine ", "Living ", "Moaning ", "Mud-", "Octagonal ",
    "Painted ", "Pearly ", "Pod-", "Poisoned ", "Quaking ", "Remade ", "Ruined ", "Rune-",
    "Sea-swept ", "Silent ", "Spiraling ", "Star-", "Storm-tossed ", "Sub-", "Sunken ", "Tall ",
    "Temporal ", "Three-Part ", "Titanic ", "Towering ", "Toxic ", "Treasure-", "Triangular ",
    "Unearthed ", "Unfinished ", "Unnatural ", "Urban ", "Watery ", "Wooden ", "Airborne ",
    "Aromatic ", "Azure ", "Belowground ", "Bone-", "Breathing ", "Brooding ", "Bubbling ",
    "Calcified ", "Cliff-", "Coastal ", "Conquered ", "Contemplation-", "Cruel ", "Cryptic ",
    "Cunning ", "Dank ", "Dark ", "Deadly ", "Death-", "Dimensional ", "Diseased ", "Drilling ",
    "Emerald ", "Erratic ", "Fabrication-", "Factory-", "Fear-", "Feeding ", "Flesh-",
    "Fossilized ", "Frightful ", "Gas-", "Granite ", "Green ", "Harvest-", "Heliotropic ",
    "Horned ", "Horrid ", "Hunting ", "Hydroponic ", "Industrial ", "Intermittent ", "Intriguing ",
    "Inverted ", "Lethargy-", "Levitating ", "Limestone ", "Midnight ", "Monastic ", "Mosaic ",
    "Mountain ", "Murder-", "Nest-", "Obsidian ", "Offshore ", "Orb-", "Perilous ",
    "Philosophical ", "Platform ", "Poorly-built ", "Pulsing ", "Putrid ", "Ramshackle ", "Red ",
    "Reversible ", "Sacrificial ", "Sapphire ", "Scarlet ", "Seaweed-", "Sentient ", "Sex-",
    "Shadow-", "Ship-", "Shunned ", "Singular ", "Sinister ", "Slaying-", "Temporary ", "Tumbled ",
    "Twilight ", "Unsealed ", "Unstable ", "Unthinkable ", "Vertical ", "Vile ", "Wailing ",
    "Walled ", "Waterborne ", "Weird ", "White ",
];

const STRUCTURES: &[&str] = &[
    "Abbey of the", "Aerie of the", "Asylum of the", "Aviary of the", "Barracks of the",
    "Bastion of the", "Bazaar of the", "Bluffs of the", "Brewery of the", "Bridge of the",
    "Cairn of the", "Canyon of the", "Carnival of the", "Castle of the", "Cathedral of the",
    "Cellars of the", "Chapel of the", "Chapterhouse of the", "Church of the", "City of the",
    "Cliffs of the", "Cloister of the", "Cocoon of the", "Coliseum of the", "Contrivance of the",
    "Cottage of the", "Court of the", "Crags of the", "Craters of the", "Crypt of the",
    "Demi-plane of the", "Dens of the", "Dimension of the", "Domain of the", "Dome of the",
    "Dungeons of the", "Dwelling of the", "Edifice of the", "Fane of the", "Farm of the",
    "Forest of the", "Forge of the", "Fortress of the", "Foundry of the", "Galleon of the",
    "Galleries of the", "Garden of the", "Garrison of the", "Generator of the", "Glade of the",
    "Globe of the", "Grotto of the", "Hall of the", "Halls of the", "Harbor of the",
    "Hatcheries of the", "Haven of the", "Hill of the", "Hive of the", "Holt of the",
    "House of the", "Hut of the", "Island of the", "Isles of the", "Jungle of the", "Keep of the",
    "Kennels of the", "Labyrinth of the", "Lair of the", "Lighthouse of the", "Lodgings of the",
    "Manse of the", "Mansion of the", "Marsh of the", "Maze of the", "Megalith of the",
    "Mill of the", "Mines of the", "Monastery of the", "Monolith of the", "Mounds of the",
    "Necropolis of the", "Nest of the", "Obelisk of the", "Outpost of the", "Pagoda of the",
    "Palace of the", "Pavilion of the", "Pits of the", "Prison of the", "Pyramid of the",
    "Rift of the", "Sanctuary of the", "Sanctum of the", "Shrine of the", "Spire of the",
    "Stockades of the", "Stronghold of the", "Tower of the", "Zeppelin of the", "Cradle of the",
    "Domains of the", "Plane of the", "Webs of the",
];

const FEATURE_PREFIXES: &[&str] = &[
    "Ant-", "Ape-", "Baboon-", "Bat-", "Beetle-", "Bitter", "Blood", "Bone-", "Brain", "Broken",
    "Bronze", "Burned", "Cabalistic", "Carnal", "Caterpillar-", "Centipede-", "Changing", "Chaos-",
    "Cloud-", "Cockroach-", "Crimson", "Crippled", "Crocodile-", "Dark", "Death-", "Decayed",
    "Deceitful", "Deluded", "Dinosaur-", "Diseased", "Dragonfly-", "Dread", "Elemental",
    "Elephant-", "Feathered", "Fiery", "Flame", "Flying", "Ghostly", "Gluttonous", "Gnarled",
    "Half-breed", "Heart-", "Hive", "Hollow", "Horned", "Howling", "Hunchback", "Hyena-", "Ice",
    "Immoral", "Immortal", "Imprisoned", "Insane", "Insatiable", "Iron", "Jackal-", "Jade",
    "Jewel", "Leech-", "Legendary", "Leopard-", "Lesser", "Lion-", "Loathsome", "Lunar", "Mad",
    "Mammoth-", "Man-eating", "Mantis-", "Many-legged", "Mist-", "Monkey-", "Moth-", "Mutant",
    "Ooze", "Outlawed", "Polluted", "Rat-", "Reawakened", "Resurrected", "Sabertooth", "Scarlet",
    "Scorched", "Secret", "Shadow", "Shattered", "Skeletal", "Slave", "Slug-", "Snail-", "Snake-",
    "Twisted", "Undead", "Unholy", "Unseen", "Wasp-", "Worm-", "Zombie", "Armored", "Army of the",
    "Artificial", "Bandit", "Bear", "Brain-", "Breeding", "Clan of the", "Cloned", "Conjoined",
    "Cursed", "Demonic", "Deranged", "Enchanted", "Enslaved", "Feral", "Flame-", "Forest", "Frost",
    "Genius", "Giant", "Grotesque", "Guardian", "Hallucinogenic", "Hellish", "Horde of the",
    "Horrific", "Hybrid", "Insidious", "Lava", "Leeching", "Mammoth", "Massive", "Master",
    "Mastermind", "Mechanical", "Mental", "Mind", "Minions of the", "Moon-", "Narcotic",
    "Poisonous", "Predatory", "Raider-", "Reaver", "Sabertoothed", "Sand-", "Scheming", "Sea-",
    "Slime-", "Smoke", "Spell-", "Summoned", "Tribe of the", "Vampiric", "Villainous", "Water",
    "Winged", "Wounded", "Wraith-",
];

const FEATURE_SUFFIXES: &[&str] = &[
    "Abbot", "Actor", "Alchemist", "Altar", "Apparition", "Apprentice", "Assassin", "Beast",
    "Behemoth", "Binder", "Bishop", "Breeder", "Brood", "Brotherhood", "Burrower", "Caller",
    "Captive", "Ceremony", "Chalice", "Changeling", "Chanter", "Circlet", "Clan", "Collector",
    "Combiner", "Congregation", "Coronet", "Crafter", "Crawler", "Creator", "Creature", "Crown",
    "Cult", "Cultists", "Daughter", "Demon", "Device", "Dreamer", "Druid", "Egg", "Emissary",
    "Emperor", "Executioner", "Exile", "Experimenter", "Eye", "Father", "Gatherer", "God",
    "Goddess", "Golem", "Grail", "Guardian", "Head", "Horde", "Hunter", "Hunters", "Hybrid",
    "Idol", "Jailer", "Keeper", "Killer", "King", "Knight", "Lich", "Lord", "Mage", "Magician",
    "Maker", "Master", "Monks", "Mother", "People", "Priest", "Priesthood", "Prince", "Princess",
    "Puppet", "Reaver", "Resurrectionist", "Scholar", "Seed", "Shaper", "Sisterhood", "Slitherer",
    "Society", "Son", "Sorcerer", "Sorceress", "Star", "Statue", "Surgeon", "Tree", "Tribe",
    "Walker", "Warlord", "Weaver", "Whisperer", "Wizard", "Artifact", "Automaton", "Basilisk",
    "Bats", "Berserkers", "Cannibal", "Centaur", "Chieftain of Goblins", "Chimera", "Cleric",
    "Cockatrice", "Colossus", "Cyclops", "Demigod", "Displacer", "Djinni", "Doppelganger",
    "Dragon", "Efreet", "Eyeball", "Frog", "Fungus", "Gargoyles", "Genie", "Ghosts", "Ghouls",
    "Giants", "Griffon", "Hag", "Harpies", "Hornets", "Horror", "Hounds", "Hydra", "Infiltrator",
    "Insect", "Larva", "Lycanthrope", "Manticore", "Medusa", "Minotaurs", "Monster", "Mummy",
    "Mushroom", "Naga", "Nomads", "Octopus", "Ogres", "Oozes", "Pirates", "Priests", "Puddings",
    "Rakshasa", "Rats", "Salamander", "Satyr", "Scorpion", "Serpent", "Shaman",
    "Shaman of the Orcs", "Simulacrum", "Skeletons", "Slimes", "Spawn", "Sphinx", "Spiders",
    "Spirits", "Titan", "Toad", "Troglodytes", "Trolls", "Tyrant", "Warlord of the Orcs", "Wasps",
    "Witch", "Wolves", "Worgs", "Worm", "Wyrm", "Wyvern", "Yeti", "Zombies",
];
