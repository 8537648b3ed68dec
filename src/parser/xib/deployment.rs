// Deployment version decoding
//
// Interface Builder stores the minimum deployment target as a packed integer:
// the high byte is the major version, the low byte encodes the minor version.
// The minor encoding is not monotonic (x.2 and x.3 are swapped), so decoding
// goes through a table instead of arithmetic.

/// Encoded deployment version -> "major.minor"
const DEPLOYMENT_VERSIONS: &[(i64, &str)] = &[
    (0x700, "7.0"),
    (0x710, "7.1"),
    (0x800, "8.0"),
    (0x810, "8.1"),
    (0x830, "8.2"),
    (0x820, "8.3"),
    (0x900, "9.0"),
    (0x910, "9.1"),
    (0x930, "9.2"),
    (0x920, "9.3"),
    (0x1000, "10.0"),
    (0x1010, "10.1"),
    (0x1030, "10.2"),
    (0x1020, "10.3"),
    (0x1100, "11.0"),
    (0x1110, "11.1"),
    (0x1130, "11.2"),
    (0x1120, "11.3"),
    (0x1200, "12.0"),
    (0x1210, "12.1"),
    (0x1230, "12.2"),
    (0x1220, "12.3"),
    (0x1300, "13.0"),
    (0x1310, "13.1"),
    (0x1330, "13.2"),
    (0x1320, "13.3"),
    // Releases after 13 follow the same scheme
    (0x1400, "14.0"),
    (0x1410, "14.1"),
    (0x1430, "14.2"),
    (0x1420, "14.3"),
    (0x1500, "15.0"),
    (0x1510, "15.1"),
    (0x1530, "15.2"),
    (0x1520, "15.3"),
    (0x1600, "16.0"),
    (0x1610, "16.1"),
    (0x1630, "16.2"),
    (0x1620, "16.3"),
    (0x1700, "17.0"),
    (0x1710, "17.1"),
    (0x1730, "17.2"),
    (0x1720, "17.3"),
    (0x1800, "18.0"),
    (0x1810, "18.1"),
    (0x1830, "18.2"),
    (0x1820, "18.3"),
    (0x1900, "19.0"),
    (0x1910, "19.1"),
    (0x1930, "19.2"),
    (0x1920, "19.3"),
];

/// Decode a packed deployment version, `None` for unknown codes
pub fn decode(encoded: i64) -> Option<&'static str> {
    DEPLOYMENT_VERSIONS
        .iter()
        .find(|(code, _)| *code == encoded)
        .map(|(_, version)| *version)
}

/// Resolve the deployment version of a document from every `version`
/// attribute seen while parsing it.
///
/// More than one marker is ambiguous: `on_multiple` is called once and the
/// result is `None` without consulting the table.
pub fn parse_deployment_version<F>(inputs: &[String], on_multiple: F) -> Option<String>
where
    F: FnOnce(),
{
    if inputs.len() > 1 {
        on_multiple();
        return None;
    }

    let version = inputs.first()?.parse::<i64>().ok()?;
    decode(version).map(str::to_string)
}
