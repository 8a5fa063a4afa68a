//! French labels

pub const LABELS: &[(&str, &str)] = &[
    ("status.loading", "Chargement..."),
    ("status.error", "Erreur lors du chargement des donn\u{00E9}es"),
    ("status.no_gpus", "Aucun GPU ne correspond aux filtres"),
    // Selection summary
    ("selection.company", "Fabricant"),
    ("selection.model", "Mod\u{00E8}le"),
    ("selection.all_models", "Tous les mod\u{00E8}les"),
    ("selection.state", "\u{00C9}tat"),
    ("selection.country", "Pays"),
    ("selection.hours", "Heures par jour"),
    ("selection.workload", "Charge"),
    ("price.rate", "Prix de l'\u{00E9}lectricit\u{00E9}"),
    ("price.period", "P\u{00E9}riode"),
    ("price.unavailable", "prix indisponible"),
    // Result columns
    ("column.gpu", "GPU"),
    ("column.tdp", "TDP"),
    ("column.kilowatts", "kW"),
    ("column.daily", "Jour"),
    ("column.monthly", "Mois"),
    ("column.annual", "Ann\u{00E9}e"),
    ("column.carbon", "CO2 / an (lb)"),
    ("carbon.insufficient_data", "donn\u{00E9}es insuffisantes"),
    ("options.companies", "Fabricants"),
    ("options.models", "Mod\u{00E8}les"),
    ("options.states", "\u{00C9}tats"),
    ("options.countries", "Pays"),
];
