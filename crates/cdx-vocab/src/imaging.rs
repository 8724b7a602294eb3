//! Imaging modality and body-region recognition.
//!
//! Three kinds of term table: whole-word terms, substring patterns and
//! special-case patterns. Special cases name specific procedures (EUS, HIDA)
//! and win outright over the tallied tables.

use std::sync::LazyLock;

use regex::Regex;

type TermTable = &'static [(&'static str, &'static [&'static str])];

const REGION_EXACT: TermTable = &[("Abdomen", &["gi", "eus", "mrcp", "hida", "ercp"])];

const REGION_SUBSTR: TermTable = &[
    (
        "Chest",
        &[
            "chest", "lung", "upper lobe", "lower lobe", "pleura", "atelectasis", "ground.glass",
            "heart", "cardiac", "pericard", "mediastin", "pneumothorax", "breast",
        ],
    ),
    (
        "Abdomen",
        &[
            "abd", "abdom", "pelvi", "liver", "gallbladder", "pancrea", "duct", "spleen",
            "stomach", "bowel", "rectum", "ileum", "iliac", "duodenum", "colon", "urinary",
            "bladder", "ureter", "kidney", "renal", "adrenal glands", "intraperitoneal", "ascites",
            "prostate", "uterus", "appendi", "retroperit", "mesenter", "paracolic",
            "lower quadrant", "perirectal", "cul-de-sac", "iliopsoas", "psoas", "hepatic",
            "hepato", "quadrant", "gastro",
        ],
    ),
    (
        "Venous",
        &[
            "venous", "jugular", "cephalic", "axillary", "basilic", "brachial", "popliteal",
            "femoral", "peroneal", "tibial", "fibular", "veins",
        ],
    ),
    ("Head", &["head", "brain", "skull"]),
    ("Neck", &["neck", "thyroid"]),
    ("Scrotum", &["scrot", "testic"]),
    ("Spine", &["spine", "cervical"]),
    ("Ankle", &["ankle"]),
    ("Foot", &["foot"]),
    ("Bone", &["bone"]),
    ("Knee", &["knee"]),
    ("Hand", &["hand"]),
    ("Wrist", &["wrist"]),
    ("Finger", &["finger"]),
    ("Heel", &["heel"]),
    ("Hip", &["hip"]),
    ("Shoulder", &["shoulder"]),
    ("Thigh", &["thigh"]),
    ("Femur", &["femur"]),
];

const MODALITY_EXACT: TermTable = &[
    ("CT", &["ct", "cat", "cta", "mdct", "ctu", "dlp", "mgy"]),
    ("Ultrasound", &["us", "dup"]),
    ("Radiograph", &["ap", "pa", "cxr"]),
    ("MRI", &["mri", "mr", "mrcp", r"t\d"]),
];

const MODALITY_SUBSTR: TermTable = &[
    ("CT", &["multidetector", "reformat", "optiray"]),
    (
        "Ultrasound",
        // "doppler" is listed twice and so counts double.
        &[
            r"u\.s\.", "ultrasound", "echotexture", "sonogra", "doppler", "duplex", "doppler",
            "echogenic", "transabdominal", "transvaginal", "non-obstetric",
        ],
    ),
    (
        "Radiograph",
        &[
            r"port\.", "radiograph", "portable", "x-ray", "supine and", "supine &", "supine only",
            "and lateral", "frontal view", "supine view", "single view", "two views",
        ],
    ),
    ("MRI", &["gadavist", "magnet", "tesla"]),
    ("Fluoroscopy", &["fluoro"]),
];

const MODALITY_SPECIAL_CASES: TermTable = &[
    (
        "CTU",
        &["ctu", "ct urogram", "ct urography", "ct ivu", "ct ivp", "ct intravenous pyelography"],
    ),
    ("Drainage", &["drain"]),
    (
        "Carotid ultrasound",
        &["carotid.*ultrasound", "carotid.*us", "carotid.*series"],
    ),
    ("EUS", &["eus", "endoscopic.*(ultrasound|us)", "echo.*endoscopy"]),
    ("MRCP", &["mrcp", "magnetic.*resonance.*cholangiopancreatography"]),
    ("HIDA", &["hida", "hepatobiliary.*iminodiacetic.*acid"]),
    (
        "ERCP",
        &["ercp", "endoscopic.*retrograde.*cholangiopancreatography", "bil endoscopy"],
    ),
    (
        "PTC",
        &["ptc", "percutaneous.*transhepatic.*cholangiography", "perc transhepatic cholangiography"],
    ),
    (
        "Upper GI Series",
        &[
            "upper.*gi", "upper.*gastrointestinal", "barium.*swallow", "barium.*meal",
            "barium.*study", "ugis", "bas/ugi",
        ],
    ),
    ("Paracentesis", &["paracentesis"]),
    ("Mammogram", &["mammo"]),
    ("MRA", &["mra", "magnetic.*resonance.*angiography"]),
    ("MRE", &["mre", "magnetic.*resonance.*enterography", "mr enterography"]),
];

/// Specific procedure → the broad modality its reports are filed under.
pub const UNIQUE_TO_BROAD_MODALITY: &[(&str, &str)] = &[
    ("CTU", "CT"),
    ("Carotid ultrasound", "Ultrasound"),
    ("EUS", "Ultrasound"),
    ("MRCP", "MRI"),
    ("ERCP", "Radiograph"),
    ("Upper GI Series", "Radiograph"),
    ("MRA", "MRI"),
    ("MRE", "MRI"),
];

/// Procedures only ever performed on one region.
pub const UNIQUE_MODALITY_TO_REGION: &[(&str, &str)] = &[
    ("CTU", "Abdomen"),
    ("EUS", "Abdomen"),
    ("MRCP", "Abdomen"),
    ("HIDA", "Abdomen"),
    ("ERCP", "Abdomen"),
    ("MRE", "Abdomen"),
    ("Upper GI Series", "Abdomen"),
    ("Carotid ultrasound", "Neck"),
    ("Mammogram", "Chest"),
];

/// A compiled category: name plus its patterns.
struct Category {
    name: &'static str,
    patterns: Vec<Regex>,
}

/// Compiled term tables for one axis (modality or region).
struct TermCounter {
    special: Vec<Category>,
    /// Exact and substring patterns merged per category, in order of first
    /// appearance across the exact table then the substring table.
    categories: Vec<Category>,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("valid imaging pattern")
}

fn compile_table(table: TermTable, wrap: fn(&str) -> String) -> Vec<Category> {
    table
        .iter()
        .map(|&(name, patterns)| Category {
            name,
            patterns: patterns.iter().map(|p| compile(&wrap(p))).collect(),
        })
        .collect()
}

impl TermCounter {
    fn new(exact: TermTable, substr: TermTable, special: TermTable) -> Self {
        let mut categories = compile_table(exact, |p| format!(r"\b{p}\b"));
        for extra in compile_table(substr, str::to_string) {
            match categories.iter_mut().find(|c| c.name == extra.name) {
                Some(existing) => existing.patterns.extend(extra.patterns),
                None => categories.push(extra),
            }
        }
        Self {
            special: compile_table(special, str::to_string),
            categories,
        }
    }

    /// Hits per category. A special-case hit returns only that category
    /// with count 1.
    fn count(&self, text: &str) -> Vec<(&'static str, usize)> {
        for category in &self.special {
            if category.patterns.iter().any(|re| re.is_match(text)) {
                return vec![(category.name, 1)];
            }
        }
        self.categories
            .iter()
            .map(|c| {
                let hits = c.patterns.iter().map(|re| re.find_iter(text).count()).sum();
                (c.name, hits)
            })
            .collect()
    }
}

static MODALITY_COUNTER: LazyLock<TermCounter> =
    LazyLock::new(|| TermCounter::new(MODALITY_EXACT, MODALITY_SUBSTR, MODALITY_SPECIAL_CASES));

static REGION_COUNTER: LazyLock<TermCounter> =
    LazyLock::new(|| TermCounter::new(REGION_EXACT, REGION_SUBSTR, &[]));

/// Result of [`resolve_imaging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagingMatch {
    pub modality: &'static str,
    pub modality_hits: usize,
    pub region: &'static str,
    pub region_hits: usize,
}

impl ImagingMatch {
    /// Both a modality and a region were recognized.
    pub fn is_complete(&self) -> bool {
        self.modality_hits > 0 && self.region_hits > 0
    }
}

fn most_frequent(counts: &[(&'static str, usize)]) -> (&'static str, usize) {
    counts
        .iter()
        .copied()
        .fold(("", 0), |best, (name, hits)| {
            if best.0.is_empty() || hits > best.1 {
                (name, hits)
            } else {
                best
            }
        })
}

/// Pick the most mentioned modality and region in `text`. Ties go to the
/// category listed first. When no region is mentioned but the modality is
/// tied to one region, that region is implied with one hit.
pub fn resolve_imaging(text: &str) -> ImagingMatch {
    let (modality, modality_hits) = most_frequent(&MODALITY_COUNTER.count(text));
    let (mut region, mut region_hits) = most_frequent(&REGION_COUNTER.count(text));

    if region_hits == 0
        && let Some((_, implied)) = UNIQUE_MODALITY_TO_REGION
            .iter()
            .find(|(m, _)| *m == modality)
    {
        region = *implied;
        region_hits = 1;
    }

    ImagingMatch {
        modality,
        modality_hits,
        region,
        region_hits,
    }
}

/// Total modality and region hits in `text`, without implying regions.
pub fn imaging_term_hits(text: &str) -> usize {
    let modality: usize = MODALITY_COUNTER.count(text).iter().map(|(_, n)| n).sum();
    let region: usize = REGION_COUNTER.count(text).iter().map(|(_, n)| n).sum();
    modality + region
}

/// The broad modality a specific procedure is filed under, or the modality
/// itself.
pub fn broad_modality(modality: &str) -> &str {
    UNIQUE_TO_BROAD_MODALITY
        .iter()
        .find(|(specific, _)| *specific == modality)
        .map_or(modality, |(_, broad)| *broad)
}
