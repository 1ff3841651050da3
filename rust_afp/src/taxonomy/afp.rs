//! The built-in AFP taxonomy. Categories are listed in
//! matching order: the first category whose keyword occurs
//! in a diagnosis is the one reported.

use super::Category;

pub fn categories() -> Vec<Category> {
    vec![
        Category::new(
            "liver disease",
            "肝脏疾病",
            &[
                "肝癌",
                "原发性肝癌",
                "肝细胞癌",
                "肝硬化",
                "慢性肝炎",
                "病毒性肝炎",
                "重型肝炎",
            ],
            "甲胎蛋白(AFP)是肝细胞癌的重要肿瘤标志物，对肝癌的诊断、疗效观察和预后判断有重要价值。在慢性肝病患者中，AFP水平升高提示肝癌风险增加",
        ),
        Category::new(
            "germ cell tumor",
            "生殖系统肿瘤",
            &["睾丸癌", "卵巢癌", "生殖细胞瘤", "精原细胞瘤"],
            "AFP是生殖细胞肿瘤的特异性标志物之一，可用于诊断和监测治疗效果。AFP水平与肿瘤负荷相关，可反映疾病进展和预后",
        ),
        Category::new(
            "embryonal tumor",
            "胚胎性肿瘤",
            &["畸胎瘤", "胚胎性癌症", "卵黄囊瘤"],
            "胚胎性肿瘤常伴有AFP升高，其水平变化可反映肿瘤的生长情况和治疗效果。AFP是评估治疗反应和复发监测的重要指标",
        ),
        Category::new(
            "digestive tract tumor",
            "消化道肿瘤",
            &["胃癌", "胰腺癌", "结直肠癌"],
            "部分消化道肿瘤可出现AFP升高，可作为辅助诊断指标。同时需要排除肝转移的可能",
        ),
        Category::new(
            "pregnancy related",
            "妊娠相关",
            &["妊娠", "孕期检查", "胎儿筛查"],
            "AFP是产前筛查的重要指标，可用于评估神经管畸形和染色体异常的风险。异常AFP水平提示需要进一步检查",
        ),
        // Diagnoses such as 转移性肝癌 also contain 肝癌, so they are
        // reported under liver disease.
        Category::new(
            "other possibly related",
            "其他可能相关",
            &["转移性肝癌", "肝占位", "腹腔肿瘤"],
            "当发现肝脏占位性病变或腹腔肿瘤时，AFP可协助鉴别诊断，特别是在判断肿瘤来源和性质方面有重要价值",
        ),
    ]
}

/// Lists the routine indications for the test
pub fn default_reason() -> String {
    String::from(
        "当前诊断不属于甲胎蛋白测定的常规指征。AFP检测主要用于：1)肝细胞癌的筛查和监测；2)生殖细胞肿瘤的诊断和随访；3)胚胎性肿瘤的评估；4)妊娠期胎儿畸形筛查。当前诊断不符合上述情况。",
    )
}
