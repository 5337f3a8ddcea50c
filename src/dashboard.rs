use crate::api::client::{ApiError, DriveClient};
use crate::api::{files, folders};
use crate::models::file::{File, FileQuery};
use crate::models::folder::Folder;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    MyDrive,
    Recent,
    Trash,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::MyDrive => "My Drive",
            View::Recent => "Recent Files",
            View::Trash => "Trash",
        }
    }

    /// Folders can only be created from the drive view
    pub fn allows_new_folder(&self) -> bool {
        matches!(self, View::MyDrive)
    }
}

/// What the user is looking at: a view, a folder inside it and a search term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub view: View,
    pub current_folder: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub folders: Vec<Folder>,
    pub files: Vec<File>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

impl Dashboard {
    pub fn new(view: View, current_folder: Option<u64>, search: Option<String>) -> Self {
        Self {
            view,
            current_folder,
            search: search.filter(|s| !s.is_empty()),
        }
    }

    /// Switching views returns to the root and clears the search
    pub fn change_view(&mut self, view: View) {
        self.view = view;
        self.current_folder = None;
        self.search = None;
    }

    pub fn open_folder(&mut self, folder_id: u64) {
        self.current_folder = Some(folder_id);
    }

    pub fn back(&mut self) {
        self.current_folder = None;
    }

    pub fn file_query(&self) -> FileQuery {
        match self.view {
            View::Trash => FileQuery {
                folder: None,
                trashed: true,
                search: self.search.clone(),
            },
            View::MyDrive | View::Recent => FileQuery {
                folder: self.current_folder,
                trashed: false,
                search: self.search.clone(),
            },
        }
    }

    /// Fetch files and folders for the current state.
    ///
    /// Both calls run concurrently; the trash view has no folders.
    pub async fn load(&self, client: &DriveClient) -> Result<Listing, ApiError> {
        let query = self.file_query();
        tracing::debug!(view = ?self.view, folder = ?self.current_folder, search = ?self.search, "loading listing");

        let folders_call = async {
            match self.view {
                View::Trash => Ok(Vec::new()),
                View::MyDrive | View::Recent => folders::list_folders(client, self.current_folder).await,
            }
        };

        let (files, folders) = tokio::try_join!(files::list_files(client, &query), folders_call)?;

        Ok(Listing { folders, files })
    }
}
