// Federative unit codes (IBGE) to display names

const REGION_NAMES: [(&str, &str); 27] = [
    ("11", "Rondônia"),
    ("12", "Acre"),
    ("13", "Amazonas"),
    ("14", "Roraima"),
    ("15", "Pará"),
    ("16", "Amapá"),
    ("17", "Tocantins"),
    ("21", "Maranhão"),
    ("22", "Piauí"),
    ("23", "Ceará"),
    ("24", "Rio Grande do Norte"),
    ("25", "Paraíba"),
    ("26", "Pernambuco"),
    ("27", "Alagoas"),
    ("28", "Sergipe"),
    ("29", "Bahia"),
    ("31", "Minas Gerais"),
    ("32", "Espírito Santo"),
    ("33", "Rio de Janeiro"),
    ("35", "São Paulo"),
    ("41", "Paraná"),
    ("42", "Santa Catarina"),
    ("43", "Rio Grande do Sul"),
    ("50", "Mato Grosso do Sul"),
    ("51", "Mato Grosso"),
    ("52", "Goiás"),
    ("53", "Distrito Federal"),
];

/// Display name for a region code, or a label embedding the code when unknown.
pub fn resolve(code: &str) -> String {
    REGION_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Estado {}", code))
}
