// District name reconciliation.
//
// Complaint forms carry free-text district names (town names, old names,
// spelling variants). The boundary dataset used by the map view names
// administrative districts, so known variants are rewritten here once at
// load time. Lookup is an exact, case-sensitive match on the trimmed value.
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub static DISTRICT_NAME_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Kedah
        ("Alor Setar", "Kota Setar"),
        ("Alor Star", "Kota Setar"),
        ("Sungai Petani", "Kuala Muda"),
        // Penang
        ("George Town", "Timur Laut"),
        ("Georgetown", "Timur Laut"),
        ("Butterworth", "Seberang Perai Utara"),
        ("Bukit Mertajam", "Seberang Perai Tengah"),
        ("Nibong Tebal", "Seberang Perai Selatan"),
        ("Balik Pulau", "Barat Daya"),
        // Perak
        ("Ipoh", "Kinta"),
        ("Taiping", "Larut dan Matang"),
        ("Teluk Intan", "Hilir Perak"),
        // Selangor
        ("Shah Alam", "Petaling"),
        ("Petaling Jaya", "Petaling"),
        ("Subang Jaya", "Petaling"),
        ("Kajang", "Hulu Langat"),
        ("Ulu Langat", "Hulu Langat"),
        ("Ulu Selangor", "Hulu Selangor"),
        // Johor
        ("Johor Baharu", "Johor Bahru"),
        ("Bandar Maharani", "Muar"),
        ("Bandar Penggaram", "Batu Pahat"),
        // Melaka
        ("Melaka City", "Melaka Tengah"),
        ("Malacca", "Melaka Tengah"),
        // Perlis
        ("Kangar", "Perlis"),
        // Pahang
        ("Cameron Highland", "Cameron Highlands"),
        // Kelantan
        ("Kota Baharu", "Kota Bharu"),
        // Terengganu
        ("K. Terengganu", "Kuala Terengganu"),
        // Negeri Sembilan
        ("Kuala Pilah District", "Kuala Pilah"),
    ])
});

/// Map a raw district label to its canonical form.
///
/// Blank or missing input gives an empty string. Labels without a map entry
/// are returned trimmed but otherwise untouched.
pub fn normalize(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or("").trim();
    match DISTRICT_NAME_MAP.get(trimmed) {
        Some(canonical) => (*canonical).to_string(),
        None => trimmed.to_string(),
    }
}
