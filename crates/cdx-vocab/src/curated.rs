//! Curated lab-test mappings that supplement the raw lab-item table.
//!
//! Panels and common abbreviations a model is likely to request are mapped to
//! the raw identifiers they cover. Identifiers that a deployment's table does
//! not contain are tolerated by the builder.

/// Markers of systemic inflammation, shared by every abdominal pathology.
pub const INFLAMMATION: &[u32] = &[
    51301, // White Blood Cells
    51755, 51300, 50889, // C-Reactive Protein
    51652,
];

pub const COMPLETE_BLOOD_COUNT: &[u32] = &[
    51279, // Red Blood Cells
    51301, // White Blood Cells
    51755, 51300, 51222, // Hemoglobin
    50811, 51221, // Hematocrit
    51638, 50810, 51250, // MCV
    51248, // MCH
    51249, // MCHC
    51265, // Platelet Count
    51244, // Lymphocytes
    51133, // Absolute Lymphocyte Count
    52769, 51245, // Lymphocytes, Percent
    51146, // Basophils
    52069, // Absolute Basophil Count
    51200, // Eosinophils
    52073, // Absolute Eosinophil Count
    51254, // Monocytes
    52074, // Absolute Monocyte Count
    51253, // Monocyte Count
    51256, // Neutrophils
    52075, // Absolute Neutrophil Count
    51277, // RDW
    52172, // RDW-SD
];

pub const BASIC_METABOLIC_PANEL: &[u32] = &[
    50809, 50931, 52569, // Glucose
    50824, 50983, 52623, // Sodium
    50822, 50971, 52610, // Potassium
    50806, 50902, 52535, // Chloride
    50803, 50882, // Bicarbonate
    51006, 52647, // Urea Nitrogen
    50912, 52024, 52546, // Creatinine
    50808, 50893, 51624, // Calcium
];

pub const COMPREHENSIVE_METABOLIC_PANEL: &[u32] = &[
    50809, 50931, 52569, // Glucose
    50824, 50983, 52623, // Sodium
    50822, 50971, 52610, // Potassium
    50806, 50902, 52535, // Chloride
    50803, 50882, // Bicarbonate
    51006, 52647, // Urea Nitrogen
    50912, 52024, 52546, // Creatinine
    50808, 50893, 51624, // Calcium
    50861, // Alanine Aminotransferase (ALT)
    50863, // Alkaline Phosphatase
    50878, // Asparate Aminotransferase (AST)
    50883, 50884, 50885, // Bilirubin
    50976, // Total Protein
];

pub const RENAL_FUNCTION_PANEL: &[u32] = &[
    50862, // Albumin
    51006, 52647, // Urea Nitrogen
    50824, 50983, 52623, // Sodium
    50808, 50893, 51624, // Calcium
    50804, 51739, // CO2
    50806, 50902, 52535, // Chloride
    50912, 52024, 52546, // Creatinine
    50809, 50931, 52569, // Glucose
    50970, // Phosphate
    50822, 50971, 52610, // Potassium
];

pub const LIVER_FUNCTION_PANEL: &[u32] = &[
    50861, // Alanine Aminotransferase (ALT)
    50878, // Asparate Aminotransferase (AST)
    50863, // Alkaline Phosphatase
    50927, // Gamma Glutamyltransferase
    50883, 50884, 50885, // Bilirubin
    51274, 51237, 51675, // Prothrombin Time
    50976, // Total Protein
    50862, // Albumin
];

pub const URINALYSIS: &[u32] = &[
    51508, // Urine Color
    51506, // Urine Appearance
    51512, // Urine Mucous
    51108, // Urine Volume
    51498, 51994, // Specific Gravity
    51093, // Osmolality, Urine
    51069, // Albumin, Urine
    51070, // Albumin/Creatinine, Urine
    51082, 51106, // Creatinine, Urine
    51097, // Potassium, Urine
    51100, // Sodium, Urine
    51102, 51068, 51492, 51992, // Protein, Urine
    51104, // Urea Nitrogen, Urine
    51462, // Amorphous Crystals
    51469, // Calcium Oxalate Crystals
    51503, // Triple Phosphate Crystals
    51505, // Uric Acid Crystals
    51510, // Urine Crystals, Other
    51493, // RBC
    51494, // RBC Casts
    51495, // RBC Clumps
    51516, // WBC
    51517, // WBC Casts
    51518, // WBC Clumps
    51507, // Urine Casts, Other
    51094, 51491, 52730, // pH
    51464, 51966, // Bilirubin
    51084, 51478, 51981, // Glucose
    51514, 52002, // Urobilinogen
    51484, 51984, // Ketone
    51487, 51987, // Nitrite
    51486, 51985, // Leukocytes
    51476, 51497, 51501, 51489, 51488, // Epithelial Cells
];

const ELECTROLYTE_PANEL: &[u32] = &[
    50824, 50983, 52623, // Sodium
    50822, 50971, 52610, // Potassium
    50806, 50902, 52535, // Chloride
    50803, 50882, // Bicarbonate
];

const LIPID_PROFILE: &[u32] = &[50907, 50905, 50906, 50904, 51000];

// aPTT and TT have no identifier.
const COAGULATION_PROFILE: &[u32] = &[51274, 51275, 51675, 51237];

// TSAT has no identifier.
const IRON_STUDIES: &[u32] = &[50952, 50953, 50998, 50924, 51250];

const LIVER_ENZYMES: &[u32] = &[50861, 50878, 50863, 50927];

const THYROID_FUNCTION_TEST: &[u32] = &[50993, 50994, 50995, 51001, 50992];

/// Label → identifiers added to the vocabulary as label-only entries.
pub const ADDITIONAL_LAB_TEST_MAPPING: &[(&str, &[u32])] = &[
    ("Complete Blood Count (CBC)", COMPLETE_BLOOD_COUNT),
    ("Basic Metabolic Panel (BMP)", BASIC_METABOLIC_PANEL),
    ("Comprehensive Metabolic Panel (CMP)", COMPREHENSIVE_METABOLIC_PANEL),
    ("Blood urea nitrogen (BUN)", &[51006, 52647]),
    ("Renal Function Panel (RFP)", RENAL_FUNCTION_PANEL),
    ("Liver Function Panel (LFP)", LIVER_FUNCTION_PANEL),
    ("Urinalysis", URINALYSIS),
    ("Electrolyte Panel", ELECTROLYTE_PANEL),
    ("Lipid Profile", LIPID_PROFILE),
    ("Coagulation Profile", COAGULATION_PROFILE),
    ("Iron Studies", IRON_STUDIES),
    ("Liver Enzymes", LIVER_ENZYMES),
    ("Thyroid Function Test (TFT)", THYROID_FUNCTION_TEST),
    ("Gamma Glutamyltransferase (GGT)", &[50927]),
    ("Phosphorus", &[50970]),
    ("Mean Corpuscular Volume (MCV)", &[51250]),
    ("C-Reactive Protein (CRP)", &[50889]),
    ("CRP", &[50889]),
    ("Prostate Specific Antigen (PSA)", &[50974]),
    ("PSA", &[50974]),
    ("Alkaline Phosphatase (ALP)", &[50863]),
    ("ALP", &[50863]),
    ("Alk Phos", &[50863]),
    ("Pregnancy Test", &[51085, 52720]),
    ("Amylase, Serum", &[50867]),
    ("Serum Amylase", &[50867]),
    ("Stool Occult Blood", &[51460]),
    ("Erythrocyte Sedimentation Rate (ESR)", &[51288]),
    ("ESR", &[51288]),
    ("Troponin", &[51003]),
    ("Direct Bilirubin", &[50883]),
    ("TSH", &[50993]),
    ("Calcium", &[50893]),
    ("White Blood Cell Count", &[51300]),
    ("Free T4", &[50995]),
    ("Blood Culture", &[90201]),
    ("Stool Culture", &[90267]),
    ("O&P", &[90250]),
];

/// Alternative label → canonical label in [`ADDITIONAL_LAB_TEST_MAPPING`].
pub const ADDITIONAL_LAB_TEST_MAPPING_SYNONYMS: &[(&str, &str)] = &[
    ("Renal Function Test (RFT)", "Renal Function Panel (RFP)"),
    ("Renal Function Test panel", "Renal Function Panel (RFP)"),
    ("Renal Function", "Renal Function Panel (RFP)"),
    ("Kidney Function Tests (KFT)", "Renal Function Panel (RFP)"),
    ("KFTs", "Renal Function Panel (RFP)"),
    ("Liver Function Test (LFT)", "Liver Function Panel (LFP)"),
    ("Liver Function Test panel", "Liver Function Panel (LFP)"),
    ("LFTs", "Liver Function Panel (LFP)"),
    ("Urine Analysis (UA)", "Urinalysis"),
    ("Electrolytes", "Electrolyte Panel"),
    ("Serum Electrolytes", "Electrolyte Panel"),
    ("Urine Pregnancy Test", "Pregnancy Test"),
];

/// Pairs of raw identifiers that measure the same thing.
pub const LAB_TEST_MAPPING_SYNONYMS: &[(u32, u32)] = &[
    (51300, 51301), // WBC Count / White Blood Cells
    (50810, 51221), // Hematocrit, Calculated / Hematocrit
    (51108, 51109), // Urine Volume / Urine Volume, Total
    (51237, 51274), // INR(PT) / PT
    (51068, 51492), // 24 hr Protein / Protein
    (51102, 51492), // Total Protein, Urine / Protein
    (51084, 51478), // Glucose, Urine
    (51488, 51476), // epithelial cells
    (51489, 51476),
    (51497, 51476),
    (51501, 51476),
    (51277, 52172), // RDW / RDW-SD
    (50824, 50983), // Sodium, Whole Blood / Sodium
    (50822, 50971), // Potassium, Whole Blood / Potassium
    (50806, 50902), // Chloride, Whole Blood / Chloride
    (50803, 50882), // Bicarbonate, Whole Blood / Bicarbonate
    (52024, 50912), // Creatinine, Whole Blood / Creatinine
    (50883, 50885), // Bilirubin
    (50884, 50885),
    (51082, 51106), // Creatinine, Urine / Urine Creatinine
    (52069, 51146), // Absolute Basophil Count / Basophils
    (51133, 51244), // Absolute Lymphocyte Count / Lymphocytes
    (52073, 51200), // Absolute Eosinophil Count / Eosinophils
    (52074, 51254), // Absolute Monocyte Count / Monocytes
    (52075, 51256), // Absolute Neutrophil Count / Neutrophils
];

/// Raw labels whose parentheses are part of the name, not an abbreviation.
pub const LAB_TEST_MAPPING_ALTERATIONS: &[(&str, &str)] = &[
    ("Treponema pallidum (Syphilis) Ab", "Treponema pallidum, syphilis, Ab"),
    ("Treponema pallidum (syphilis) value", "Treponema pallidum, syphilis, value"),
    ("Gray Top Hold (plasma)", "Gray Top Hold, plasma"),
    ("Green Top Hold (plasma)", "Green Top Hold, plasma"),
    ("K (GREEN)", "K, GREEN"),
];

/// Body-fluid category → words that select it, checked in order.
pub const FLUID_MAPPING: &[(&str, &[&str])] = &[
    ("Blood", &["Blood", "Plasma", "Serum"]),
    ("Urine", &["Urine"]),
    ("Stool", &["Stool"]),
    ("Ascites", &["Ascites"]),
    ("Cerebrospinal Fluid", &["Cerebrospinal Fluid"]),
    ("Joint Fluid", &["Joint Fluid"]),
    ("Bone Marrow", &["Bone Marrow"]),
    ("Pleural", &["Pleural"]),
    ("Other Body Fluid", &["Other Body Fluid"]),
];

/// Look up a curated panel by label.
pub fn additional_mapping(label: &str) -> Option<&'static [u32]> {
    ADDITIONAL_LAB_TEST_MAPPING
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, ids)| *ids)
}
