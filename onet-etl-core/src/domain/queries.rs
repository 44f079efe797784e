// onet-etl-core/src/domain/queries.rs

use crate::domain::table::Value;

/// A titled, read-only query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    pub title: &'static str,
    pub sql: &'static str,
}

/// Rows returned by an ad-hoc query, kept in row-major order for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

pub const INSIGHT_QUERIES: &[NamedQuery] = &[
    NamedQuery {
        title: "Top 10 Skills for High-Preparation Jobs",
        sql: r#"
SELECT
    dlsa.anchor_description AS skill_name,
    ROUND(AVG(fs.data_value), 2) AS avg_skill_score
FROM fact_skills fs
JOIN fact_job_zones fjz
    ON fs.onetsoc_code = fjz.onetsoc_code
JOIN dim_job_zone_reference djzr
    ON fjz.job_zone = djzr.job_zone
JOIN dim_level_scale_anchors dlsa
    ON fs.element_id = dlsa.element_id
   AND fs.scale_id = dlsa.scale_id
WHERE djzr.job_zone >= 4
GROUP BY dlsa.anchor_description
ORDER BY avg_skill_score DESC
LIMIT 10;
"#,
    },
    NamedQuery {
        title: "Average Knowledge Score by Job Zone",
        sql: r#"
SELECT
    djzr.job_zone,
    djzr.name AS job_zone_name,
    ROUND(AVG(fk.data_value), 2) AS avg_knowledge_score
FROM fact_knowledge fk
JOIN fact_job_zones fjz
    ON fk.onetsoc_code = fjz.onetsoc_code
JOIN dim_job_zone_reference djzr
    ON fjz.job_zone = djzr.job_zone
GROUP BY djzr.job_zone, djzr.name
ORDER BY djzr.job_zone;
"#,
    },
    NamedQuery {
        title: "Occupations with Highest Ability Requirements",
        sql: r#"
SELECT
    dod.title AS occupation_title,
    dlsa.anchor_description AS ability_name,
    ROUND(AVG(fa.data_value), 2) AS avg_ability_score
FROM fact_abilities fa
JOIN dim_occupation_data dod
    ON fa.onetsoc_code = dod.onetsoc_code
JOIN dim_level_scale_anchors dlsa
    ON fa.element_id = dlsa.element_id
   AND fa.scale_id = dlsa.scale_id
GROUP BY dod.title, dlsa.anchor_description
ORDER BY avg_ability_score DESC
LIMIT 10;
"#,
    },
    NamedQuery {
        title: "Occupations with Broadest Ability Requirements",
        sql: r#"
SELECT
    dod.title AS occupation_title,
    COUNT(DISTINCT fa.element_id) AS distinct_abilities_count
FROM fact_abilities fa
JOIN dim_occupation_data dod
    ON fa.onetsoc_code = dod.onetsoc_code
GROUP BY dod.title
ORDER BY distinct_abilities_count DESC
LIMIT 10;
"#,
    },
];

pub const VALIDATION_CHECKS: &[NamedQuery] = &[
    NamedQuery {
        title: "Missing occupation references in fact_skills",
        sql: r#"
SELECT DISTINCT f.onetsoc_code
FROM fact_skills f
LEFT JOIN dim_occupation_data d
  ON f.onetsoc_code = d.onetsoc_code
WHERE d.onetsoc_code IS NULL;
"#,
    },
    NamedQuery {
        title: "Missing occupation references in fact_abilities",
        sql: r#"
SELECT DISTINCT f.onetsoc_code
FROM fact_abilities f
LEFT JOIN dim_occupation_data d
  ON f.onetsoc_code = d.onetsoc_code
WHERE d.onetsoc_code IS NULL;
"#,
    },
    NamedQuery {
        title: "Invalid job_zone values",
        sql: r#"
SELECT *
FROM fact_job_zones
WHERE job_zone NOT BETWEEN 1 AND 5;
"#,
    },
    NamedQuery {
        title: "Invalid CI bounds in fact_knowledge",
        sql: r#"
SELECT onetsoc_code, element_id, scale_id, data_value, lower_ci_bound, upper_ci_bound
FROM fact_knowledge
WHERE data_value < lower_ci_bound
   OR data_value > upper_ci_bound;
"#,
    },
    NamedQuery {
        title: "Duplicate rows in fact_skills",
        sql: r#"
SELECT onetsoc_code, element_id, scale_id, COUNT(*) AS dup_count
FROM fact_skills
GROUP BY onetsoc_code, element_id, scale_id
HAVING COUNT(*) > 1;
"#,
    },
    NamedQuery {
        title: "Occupations with no skills",
        sql: r#"
SELECT d.onetsoc_code, d.title, fs.onetsoc_code AS fact_skills_onetsoc_code
FROM dim_occupation_data d
LEFT JOIN fact_skills fs
  ON d.onetsoc_code = fs.onetsoc_code
WHERE fs.onetsoc_code IS NULL;
"#,
    },
    NamedQuery {
        title: "Occupations with no abilities",
        sql: r#"
SELECT d.onetsoc_code, d.title, fa.onetsoc_code AS fact_abilities_onetsoc_code
FROM dim_occupation_data d
LEFT JOIN fact_abilities fa
  ON d.onetsoc_code = fa.onetsoc_code
WHERE fa.onetsoc_code IS NULL;
"#,
    },
];
