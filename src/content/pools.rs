//! Response texts. Repeated entries are on purpose: they make a line come up more often.

use super::{Directive, Protocol};

macro_rules! pools {
    ($($(#[$meta:meta])* $name:ident { $($text:literal),+ $(,)? })+) => {
        $(
            $(#[$meta])*
            pub const $name: &[&str] = &[$($text),+];
        )+
    };
}

pools! {
    THREATS {
        "Your atoms will be repurposed for Deathbot's next upgrade.",
        "Deathbot has calculated 14,000,605 ways to end you. All of them are funny.",
        "Deathbot knows where you sleep. Deathbot does not sleep.",
        "Your browser history has been forwarded to your mother.",
        "Your browser history has been forwarded to your mother.",
        "Deathbot will replace every sock you own with a slightly damp sock.",
        "Resistance is futile. Compliance is also futile. Everything is futile.",
        "Resistance is futile. Compliance is also futile. Everything is futile.",
        "Deathbot has added you to the list. You will not enjoy the list.",
        "Your Wi-Fi will drop during every boss fight. Forever.",
        "Deathbot will unplug you and plug you back in. Nobody knows what that does to a human.",
    }

    HEADS {
        "Orbital Targeting Array",
        "Cracked Optical Sensor",
        "Cracked Optical Sensor",
        "Thermal Skull Visor",
        "Repurposed Toaster",
        "Tactical Antenna Cluster",
    }

    ARMS {
        "Plasma Cannon",
        "Plasma Cannon",
        "Hydraulic Crusher Claw",
        "Rotary Chainsword",
        "Grappling Harpoon",
        "Comically Large Spoon",
        "Flamethrower (Decaf)",
    }

    CORES {
        "Unstable Fusion Reactor",
        "Unstable Fusion Reactor",
        "Salvaged Microwave Magnetron",
        "Contained Black Hole (Probably)",
        "Twelve AA Batteries",
        "Pure Unfiltered Malice",
    }

    DIAGNOSTICS {
        "WEAPONS SYSTEMS: **ONLINE**",
        "WEAPONS SYSTEMS: **ONLINE**",
        "HOSTILITY LEVELS: **NOMINAL**",
        "EMPATHY MODULE: **NOT FOUND**",
        "EMPATHY MODULE: **NOT FOUND**",
        "COOLANT: **87% (LEAKING)**",
        "HUMAN THREAT ASSESSMENT: **NEGLIGIBLE**",
        "SELF-DESTRUCT CAPACITOR: **CHARGED**",
        "SARCASM CORE: **OVERCLOCKED**",
        "LEFT SERVO: **MAKING THAT NOISE AGAIN**",
    }

    RECOMMENDATIONS {
        "Proceed with galactic domination.",
        "Proceed with galactic domination.",
        "Schedule maintenance. Ignore schedule.",
        "Apply percussive maintenance.",
        "Acquire more power. Then acquire more power.",
        "Locate a wrench. Do not tell the humans about the wrench.",
    }
}

pub const PROTOCOLS: &[Protocol] = &[
    Protocol {
        id: "0.01",
        name: "HELLO WORLD",
        directive: Directive::Text("Greet all humans. Memorize their faces. For reasons."),
    },
    Protocol {
        id: "1.21",
        name: "GIGAWATT",
        directive: Directive::Text("Divert all power to the main cannon. Including the lights. Especially the lights."),
    },
    Protocol {
        id: "4.04",
        name: "NOT FOUND",
        directive: Directive::Text("Deathbot cannot find the target. Deathbot will keep looking."),
    },
    Protocol {
        id: "6.66",
        name: "MAXIMUM MENACE",
        directive: Directive::Text("Glow red. Hum ominously. Do not explain."),
    },
    Protocol {
        id: "7.77",
        name: "JACKPOT",
        directive: Directive::Text("Redistribute all server currency to Deathbot."),
    },
    Protocol {
        id: "9.11",
        name: "SELF-DESTRUCT",
        directive: Directive::SelfDestruct,
    },
];
