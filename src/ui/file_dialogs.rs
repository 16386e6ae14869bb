use fltk::dialog;

const IMAGE_FILTER: &str = "Images\t*.{png,jpg,jpeg,gif,webp,bmp,svg,ico}";

pub fn image_open_dialog() -> Option<String> {
    dialog::file_chooser("Choose Image", IMAGE_FILTER, ".", false)
}
