use crate::{constants::IMAGE_FOLDERS, utils::AppError};

pub mod image;

/// Storage key of an uploaded image, `<folder>/<name>`
fn image_key(folder: &str, image_name: &str) -> Result<String, AppError> {
    if !IMAGE_FOLDERS.contains(&folder) {
        let err = format!(
            "Invalid folder. Must be one of: {}",
            IMAGE_FOLDERS.join(", ")
        );
        return Err(AppError::BadRequestErr(err));
    }
    let name = image_name.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        let err = format!("Invalid image name: {image_name}");
        return Err(AppError::BadRequestErr(err));
    }
    let name = name.split_whitespace().collect::<Vec<_>>().join("_");
    Ok(format!("{folder}/{name}"))
}
