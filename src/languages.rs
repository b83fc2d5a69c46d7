//! OCR language catalogue.
//!
//! The service runs Tesseract-style recognition, so languages are addressed
//! by their ISO 639-2/3 codes plus a handful of script/era suffixes
//! (`chi_sim`, `deu_latf`, `jpn_vert`, …). The set is closed: anything not
//! listed here is rejected before a request is built.

closed_enum! {
    /// A language the OCR model can be asked to recognise.
    pub enum OcrLanguage, error = InvalidOcrLanguage {
        Afrikaans => "afr",
        Amharic => "amh",
        Arabic => "ara",
        Assamese => "asm",
        Azerbaijani => "aze",
        AzerbaijaniCyrillic => "aze_cyrl",
        Belarusian => "bel",
        Bengali => "ben",
        Tibetan => "bod",
        Bosnian => "bos",
        Breton => "bre",
        Bulgarian => "bul",
        Catalan => "cat",
        Cebuano => "ceb",
        Czech => "ces",
        ChineseSimplified => "chi_sim",
        ChineseSimplifiedVertical => "chi_sim_vert",
        ChineseTraditional => "chi_tra",
        ChineseTraditionalVertical => "chi_tra_vert",
        Cherokee => "chr",
        Corsican => "cos",
        Welsh => "cym",
        Danish => "dan",
        German => "deu",
        GermanFraktur => "deu_latf",
        Dhivehi => "div",
        Dzongkha => "dzo",
        Greek => "ell",
        English => "eng",
        MiddleEnglish => "enm",
        Esperanto => "epo",
        Estonian => "est",
        Basque => "eus",
        Faroese => "fao",
        Persian => "fas",
        Filipino => "fil",
        Finnish => "fin",
        French => "fra",
        MiddleFrench => "frm",
        WesternFrisian => "fry",
        ScottishGaelic => "gla",
        Irish => "gle",
        Galician => "glg",
        AncientGreek => "grc",
        Gujarati => "guj",
        Haitian => "hat",
        Hebrew => "heb",
        Hindi => "hin",
        Croatian => "hrv",
        Hungarian => "hun",
        Armenian => "hye",
        Inuktitut => "iku",
        Indonesian => "ind",
        Icelandic => "isl",
        Italian => "ita",
        ItalianOld => "ita_old",
        Javanese => "jav",
        Japanese => "jpn",
        JapaneseVertical => "jpn_vert",
        Kannada => "kan",
        Georgian => "kat",
        GeorgianOld => "kat_old",
        Kazakh => "kaz",
        Khmer => "khm",
        Kyrgyz => "kir",
        Kurmanji => "kmr",
        Korean => "kor",
        KoreanVertical => "kor_vert",
        Lao => "lao",
        Latin => "lat",
        Latvian => "lav",
        Lithuanian => "lit",
        Luxembourgish => "ltz",
        Malayalam => "mal",
        Marathi => "mar",
        Macedonian => "mkd",
        Maltese => "mlt",
        Mongolian => "mon",
        Maori => "mri",
        Malay => "msa",
        Burmese => "mya",
        Nepali => "nep",
        Dutch => "nld",
        Norwegian => "nor",
        Occitan => "oci",
        Oriya => "ori",
        Punjabi => "pan",
        Polish => "pol",
        Portuguese => "por",
        Pashto => "pus",
        Quechua => "que",
        Romanian => "ron",
        Russian => "rus",
        Sanskrit => "san",
        Sinhala => "sin",
        Slovak => "slk",
        Slovenian => "slv",
        Sindhi => "snd",
        Spanish => "spa",
        SpanishOld => "spa_old",
        Albanian => "sqi",
        Serbian => "srp",
        SerbianLatin => "srp_latn",
        Sundanese => "sun",
        Swahili => "swa",
        Swedish => "swe",
        Syriac => "syr",
        Tamil => "tam",
        Tatar => "tat",
        Telugu => "tel",
        Tajik => "tgk",
        Thai => "tha",
        Tigrinya => "tir",
        Tonga => "ton",
        Turkish => "tur",
        Uyghur => "uig",
        Ukrainian => "ukr",
        Urdu => "urd",
        Uzbek => "uzb",
        UzbekCyrillic => "uzb_cyrl",
        Vietnamese => "vie",
        Yiddish => "yid",
        Yoruba => "yor",
    }
}
