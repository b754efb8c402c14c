use class_statistics::Record;

/// A handful of rows from the wine dataset, one string-typed Flavanoids value included.
pub fn sample_records() -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_str(
        r#"[
            {"Alcohol": 1, "Ash": 2.43, "Magnesium": 127, "Flavanoids": 3.06, "Hue": 1.04},
            {"Alcohol": 1, "Ash": 2.14, "Magnesium": 100, "Flavanoids": 2.76, "Hue": 1.05},
            {"Alcohol": 1, "Ash": 2.67, "Magnesium": 101, "Flavanoids": "3.24", "Hue": 1.03},
            {"Alcohol": 2, "Ash": 1.36, "Magnesium": 88, "Flavanoids": 0.57, "Hue": 1.05},
            {"Alcohol": 2, "Ash": 2.28, "Magnesium": 101, "Flavanoids": 1.41, "Hue": 1.25},
            {"Alcohol": 3, "Ash": 2.32, "Magnesium": 85, "Flavanoids": 1.25, "Hue": 0.7},
            {"Alcohol": 3, "Ash": 2.38, "Magnesium": 102, "Flavanoids": 0.61, "Hue": 0.74}
        ]"#,
    )
}
