use database::entities::course;
use models::course::{CourseDraft, CoursePatchDraft};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A stored course, using the table's column names as JSON keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    #[serde(rename = "Course_Number")]
    pub course_number: String,
    #[serde(rename = "Dept")]
    pub dept: String,
    #[serde(rename = "Level")]
    pub level: Option<i32>,
    #[serde(rename = "Hours")]
    pub hours: Option<i32>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            course_number: model.course_number,
            dept: model.dept,
            level: model.level,
            hours: model.hours,
            name: model.name,
            description: model.description,
        }
    }
}

/// Body of `POST /courses`. Required fields are checked after decoding so that
/// a missing field is reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    #[serde(rename = "Course_Number")]
    #[schema(required = true, example = "15-122")]
    pub course_number: Option<String>,
    #[serde(rename = "Dept")]
    #[schema(required = true, example = "CS")]
    pub dept: Option<String>,
    #[serde(rename = "Level")]
    pub level: Option<i32>,
    #[serde(rename = "Hours")]
    pub hours: Option<i32>,
    #[serde(rename = "Name")]
    #[schema(required = true, example = "Principles of Imperative Computation")]
    pub name: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

impl From<CreateCourseRequest> for CourseDraft {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            course_number: request.course_number,
            dept: request.dept,
            name: request.name,
            level: request.level,
            hours: request.hours,
            description: request.description,
        }
    }
}

/// Body of `PUT /courses/{key}`. Absent fields are left alone, `null` clears an optional column.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    #[serde(rename = "Course_Number", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub course_number: Option<Option<String>>,
    #[serde(rename = "Dept", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub dept: Option<Option<String>>,
    #[serde(rename = "Level", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub level: Option<Option<i32>>,
    #[serde(rename = "Hours", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub hours: Option<Option<i32>>,
    #[serde(rename = "Name", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(rename = "Description", default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl From<UpdateCourseRequest> for CoursePatchDraft {
    fn from(request: UpdateCourseRequest) -> Self {
        Self {
            course_number: request.course_number,
            dept: request.dept,
            name: request.name,
            level: request.level,
            hours: request.hours,
            description: request.description,
        }
    }
}

/// Keeps an explicit `null` distinct from an absent field
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let request: UpdateCourseRequest =
            serde_json::from_str(r#"{"Description": null, "Hours": 4}"#).unwrap();

        assert_eq!(request.description, Some(None));
        assert_eq!(request.hours, Some(Some(4)));
        assert_eq!(request.level, None);
        assert_eq!(request.name, None);
    }

    #[test]
    fn test_response_uses_column_names() {
        let response = CourseResponse {
            course_number: "15-122".into(),
            dept: "CS".into(),
            level: Some(100),
            hours: None,
            name: "Imperative".into(),
            description: None,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "Course_Number": "15-122",
                "Dept": "CS",
                "Level": 100,
                "Hours": null,
                "Name": "Imperative",
                "Description": null,
            })
        );
    }
}
