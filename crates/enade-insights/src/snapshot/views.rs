use super::Snapshot;
use crate::analysis::ComparisonResult;
use crate::survey::Dimension;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct AreaListing {
    pub all_areas: Vec<String>,
    pub institution_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_courses: usize,
    pub institution_courses: usize,
    pub institution_areas: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardCourse {
    pub area: String,
    pub overall_mean: Option<f64>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionCourses {
    pub name: &'static str,
    pub courses: Vec<DashboardCourse>,
}

/// One benchmark course with its overall mean and dimension row means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePerformance {
    pub area: String,
    pub overall_mean: Option<f64>,
    #[serde(rename = "NOC")]
    pub pedagogical: Option<f64>,
    #[serde(rename = "NFC")]
    pub infrastructure: Option<f64>,
    #[serde(rename = "NAC")]
    pub enrichment: Option<f64>,
}

/// Chart-ready projection of the snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub comparison_chart: Option<ComparisonResult>,
    pub performance: Vec<CoursePerformance>,
    pub dimension_analysis: BTreeMap<&'static str, DimensionCourses>,
}

impl Snapshot {
    pub fn areas(&self) -> AreaListing {
        AreaListing {
            all_areas: self.metadata.course_areas.clone(),
            institution_areas: self.metadata.institution_areas.clone(),
        }
    }

    pub fn dashboard(&self) -> DashboardData {
        let performance = self
            .courses
            .iter()
            .map(|course| CoursePerformance {
                area: course.area.clone(),
                overall_mean: course.overall_mean,
                pedagogical: course.scores.pedagogical,
                infrastructure: course.scores.infrastructure,
                enrichment: course.scores.enrichment,
            })
            .collect();

        let dimension_analysis = Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                let courses = self
                    .courses
                    .iter()
                    .map(|course| DashboardCourse {
                        area: course.area.clone(),
                        overall_mean: course.overall_mean,
                        score: course.scores.get(dimension),
                    })
                    .collect();
                (
                    dimension.code(),
                    DimensionCourses {
                        name: dimension.label(),
                        courses,
                    },
                )
            })
            .collect();

        DashboardData {
            summary: DashboardSummary {
                total_courses: self.metadata.total_courses,
                institution_courses: self.metadata.institution_courses,
                institution_areas: self.metadata.institution_areas.len(),
            },
            comparison_chart: self.comparison(None).cloned(),
            performance,
            dimension_analysis,
        }
    }
}
