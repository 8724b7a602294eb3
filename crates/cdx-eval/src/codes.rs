//! Procedure code tables (ICD-9 integer codes, ICD-10-PCS strings) and the
//! discharge-summary phrases that stand in for them.

use crate::procedures::ProcedureCodes;

pub const APPENDECTOMY: ProcedureCodes = ProcedureCodes {
    icd9: &[4701, 4709],
    icd10: &["0DTJ4ZZ", "0DTJ0ZZ"],
    keywords: &["appendectomy"],
};

pub const CHOLECYSTECTOMY: ProcedureCodes = ProcedureCodes {
    icd9: &[5123, 5122, 5121, 5102, 5124, 5103],
    icd10: &["0FB44ZZ", "0FB40ZZ"],
    // Misspellings are as they appear in discharge summaries.
    keywords: &[
        "cholecystectomy",
        "cholecystecotmy",
        "cholecsytectomy",
        "cholecystecomy",
        "cholecytectomy",
        "laparoscopic cholecystitis",
        "cholecyctectomy",
    ],
};

pub const ERCP: ProcedureCodes = ProcedureCodes {
    icd9: &[
        8766, 5181, 5184, 5221, 5187, 5293, 5188, 5110, 5185, 8754, 5114, 9705,
    ],
    icd10: &[
        "0F798DZ", "0F798ZZ", "0F7D8DZ", "0FB98ZX", "0FBD8ZX", "0FC98ZZ", "0FD98ZX", "0FDG8ZX",
        "BF101ZZ", "BF10YZZ", "BF11YZZ", "BF141ZZ", "BF14YZZ", "0FJB8ZZ", "0FJD8ZZ",
    ],
    keywords: &[
        "biliary stent",
        "biliary cannulation",
        "ercp",
        "endoscopic retrograde cholangiography",
        "endoscopic retrograde cholangiopancreatography",
        "cholangiogram",
        "cbd stent",
        "pancreatic stent",
        "sphincterotomy",
        "sphinctertomy",
    ],
};

/// Percutaneous drainage of any abdominal collection. Free-text drainage
/// needs a site as well, see [`DRAINAGE_KEYWORDS`].
pub const DRAINAGE: ProcedureCodes = ProcedureCodes {
    icd9: &[5491],
    icd10: &[
        "0W2JX0Z", "0W9J30Z", "0W9J3ZZ", "0W9J3ZX", "0W9G30Z", "0W9G3ZZ", "0W9G3ZX",
    ],
    keywords: &[],
};

/// Drainage of the pancreas and biliary tree.
pub const PANCREATIC_DRAINAGE_ICD10: &[&str] =
    &["0F2BX0Z", "0F9430Z", "0F9G30Z", "0F998ZZ", "0F998ZX"];

pub const DRAINAGE_KEYWORDS: &[&str] = &["drain", "pigtail", "catheter", "aspiration"];

pub const COLECTOMY: ProcedureCodes = ProcedureCodes {
    icd9: &[
        4575, 4576, 4863, 4562, 4542, 4579, 4531, 4530, 4533, 1739, 1734, 1736, 4572, 4573, 1733,
        4541, 1732, 5459, 5451, 4574, 9624,
    ],
    icd10: &[
        "0DBM8ZZ", "0DBH8ZZ", "0DB90ZZ", "0DB94ZZ", "0DBB0ZZ", "0DTK4ZZ", "0DTM4ZZ", "0DTL4ZZ",
        "0DTN4ZZ", "0DBG4ZZ", "0DTH0ZZ", "0DTF0ZZ", "0DTN0ZZ", "0DB80ZZ", "0DBA0ZZ", "0DB84ZZ",
        "0DBB4ZZ", "0DTF4ZZ", "0DBH0ZZ", "0DTH4ZZ", "0DNN0ZZ", "0DBM4ZZ", "0DTM0ZZ", "0DNB0ZZ",
        "0DBM0ZZ", "0DBE0ZZ", "0DBG0ZZ", "0DNE0ZZ", "0DNE4ZZ", "0DN90ZZ", "0DNL4ZZ", "0DNA0ZZ",
        "0DBH4ZZ", "0DTK0ZZ", "0DTL0ZZ", "0DNB4ZZ", "0DNL0ZZ", "0DNN4ZZ", "0DBA8ZZ", "0DBA4ZZ",
        "0DNB7ZZ", "0DBE4ZZ", "0DTNFZZ", "0DNA4ZZ", "0DN94ZZ", "0DB98ZZ", "0DTH8ZZ", "0DTN7ZZ",
        "0DBB3ZZ", "0DBN0ZZ", "0DBN4ZZ", "0DT80ZZ",
    ],
    keywords: &[
        "low anterior resection",
        "colectomy",
        "colonic resection",
        "colostomy",
        "resection of rectosigmoid colon",
        "resection of sigmoid colon",
        "rectosigmoid resection",
        "resection of colon",
        "sigmoidectomy",
        "sigmoid resection",
        "small bowel resection",
    ],
};

/// Modifiers that turn an organ mention into a request for its removal.
pub const SURGERY_MODIFIERS: &[&str] = &["surgery", "surgical", "removal", "remove"];
