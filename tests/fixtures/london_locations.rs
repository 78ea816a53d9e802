//! Central London landmarks for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, address: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            address,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Westminster
// ============================================================================

pub const BIG_BEN: Location = Location::new(
    "Big Ben",
    "Westminster, London SW1A 0AA, UK",
    51.5007292,
    -0.1246254,
);
pub const BUCKINGHAM_PALACE: Location = Location::new(
    "Buckingham Palace",
    "London SW1A 1AA, UK",
    51.501364,
    -0.14189,
);
pub const COVENT_GARDEN: Location = Location::new(
    "Covent Garden",
    "London WC2E 8RF, UK",
    51.5117321,
    -0.1240211,
);

// ============================================================================
// City and South Bank
// ============================================================================

pub const ST_PAULS: Location = Location::new(
    "St Paul's Cathedral",
    "St. Paul's Churchyard, London EC4M 8AD, UK",
    51.5138453,
    -0.0983506,
);
pub const TATE_MODERN: Location = Location::new(
    "Tate Modern",
    "Bankside, London SE1 9TG, UK",
    51.507595,
    -0.099356,
);
pub const TOWER_BRIDGE: Location = Location::new(
    "Tower Bridge",
    "Tower Bridge Rd, London SE1 2UP, UK",
    51.5054564,
    -0.0753565,
);
pub const TOWER_OF_LONDON: Location = Location::new(
    "Tower of London",
    "London EC3N 4AB, UK",
    51.5081124,
    -0.0759493,
);

// ============================================================================
// Museums and further out
// ============================================================================

pub const BRITISH_MUSEUM: Location = Location::new(
    "British Museum",
    "Great Russell St, London WC1B 3DG, UK",
    51.5194133,
    -0.1269566,
);
pub const NATURAL_HISTORY_MUSEUM: Location = Location::new(
    "Natural History Museum",
    "Cromwell Rd, South Kensington, London SW7 5BD, UK",
    51.4966392,
    -0.1764198,
);
pub const CAMDEN_MARKET: Location = Location::new(
    "Camden Market",
    "Camden Lock Pl, London NW1 8AF, UK",
    51.5413,
    -0.1466,
);
pub const GREENWICH_OBSERVATORY: Location = Location::new(
    "Royal Observatory Greenwich",
    "Blackheath Ave, London SE10 8XJ, UK",
    51.4769,
    -0.0005,
);

/// Every landmark above.
pub const ALL: &[Location] = &[
    BIG_BEN,
    BUCKINGHAM_PALACE,
    COVENT_GARDEN,
    ST_PAULS,
    TATE_MODERN,
    TOWER_BRIDGE,
    TOWER_OF_LONDON,
    BRITISH_MUSEUM,
    NATURAL_HISTORY_MUSEUM,
    CAMDEN_MARKET,
    GREENWICH_OBSERVATORY,
];

/// A short sightseeing day: start at Big Ben, then three City sights.
pub fn day_out() -> Vec<Location> {
    vec![BIG_BEN, TOWER_BRIDGE, ST_PAULS, TATE_MODERN]
}

/// Looks a landmark up by name.
pub fn by_name(name: &str) -> Option<Location> {
    ALL.iter().copied().find(|location| location.name == name)
}
